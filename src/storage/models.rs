//! Data models for the storage layer

use crate::cli::types::{TeamId, UserId};
use serde::{Deserialize, Serialize};

/// A home team a user can pick at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTeam {
    pub id: TeamId,
    pub name: String,
    pub code: String,
    pub color: String,
    pub accent: String,
}

/// Registered user, with the home team joined in
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Reference path returned by the avatar store, e.g. `/uploads/avatars/<uuid>.png`
    pub avatar: String,
    #[serde(skip_serializing)]
    pub team_id: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<LocalTeam>,
    /// Unix seconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nickname: String,
    pub password_hash: String,
    pub avatar: String,
    pub team_id: TeamId,
}
