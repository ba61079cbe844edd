//! Type-safe wrappers for ids and seasons.

pub mod ids;
pub mod time;

pub use ids::{PlayerId, TeamId, UserId};
pub use time::Season;
