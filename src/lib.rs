//! BuzzerBeater basketball fan backend
//!
//! An HTTP API for a basketball fan community: users register with a nickname,
//! password, home team and avatar, sign in with bearer tokens, and browse NBA
//! teams, players and season averages proxied from the balldontlie statistics
//! API.
//!
//! ## Features
//!
//! - **Cached NBA client**: per-path TTL cache in front of the upstream API,
//!   with a longer TTL for the team list
//! - **Active franchise filter**: historical and defunct teams are dropped and
//!   the remaining 30 are enriched with localized names, logos and colors
//! - **Accounts**: bcrypt password hashes and HS256 JWT sessions
//! - **Avatars**: image uploads stored on disk and served under `/uploads`
//! - **Storage**: SQLite tables for users and the selectable home teams
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use buzzerbeater::{config::NbaConfig, nba::NbaClient};
//!
//! # async fn example() -> buzzerbeater::Result<()> {
//! let client = NbaClient::new(&NbaConfig::new("your-api-key"))?;
//! for team in client.get_teams().await? {
//!     println!("{} ({})", team.full_name, team.conference);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export BALLDONTLIE_API_KEY=...
//! export BUZZERBEATER_JWT_SECRET=...
//! buzzerbeater serve --bind 127.0.0.1:8080
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod nba;
pub mod observability;
pub mod storage;
pub mod uploads;

// Re-export commonly used types
pub use cli::types::{PlayerId, Season, TeamId, UserId};
pub use error::{BuzzerError, Result};

pub const API_KEY_ENV_VAR: &str = "BALLDONTLIE_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "BALLDONTLIE_BASE_URL";
pub const TEAMS_CACHE_TTL_ENV_VAR: &str = "NBA_TEAMS_CACHE_TTL_SECS";
pub const CACHE_TTL_ENV_VAR: &str = "NBA_CACHE_TTL_SECS";
pub const REQUEST_TIMEOUT_ENV_VAR: &str = "NBA_REQUEST_TIMEOUT_SECS";
pub const JWT_SECRET_ENV_VAR: &str = "BUZZERBEATER_JWT_SECRET";
pub const TOKEN_TTL_ENV_VAR: &str = "BUZZERBEATER_TOKEN_TTL_SECS";
pub const BCRYPT_COST_ENV_VAR: &str = "BUZZERBEATER_BCRYPT_COST";
