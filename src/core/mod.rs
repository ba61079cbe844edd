//! Core utilities shared by the upstream client
//!
//! - `cache`: in-memory TTL cache and table-driven TTL policy
//! - `http`: upstream request headers

pub mod cache;
pub mod http;

pub use cache::{TtlCache, TtlPolicy, TtlRule};
pub use http::api_key_header_map;
