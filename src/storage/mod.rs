//! Storage layer for users and their home teams
//!
//! This module wraps the SQLite database, organized into:
//! - `models`: Data structures
//! - `schema`: Database connection, schema and seed data
//! - `queries`: CRUD operations used by the HTTP API

pub mod models;
pub mod queries;
pub mod schema;


pub use models::*;
pub use schema::AppDatabase;
