//! Client for the balldontlie NBA statistics API
//!
//! - `http`: authenticated upstream fetcher
//! - `types`: JSON records (teams, players, season averages)
//! - `teams`: active-franchise whitelist and display metadata
//! - `client`: cached accessors used by the HTTP API

pub mod client;
pub mod http;
pub mod teams;
pub mod types;

pub use client::NbaClient;
pub use http::UpstreamFetcher;
pub use teams::{filter_active_teams, TeamDirectory};
pub use types::{Player, SeasonAverage, Team};
