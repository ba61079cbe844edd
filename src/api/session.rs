//! Login and logout

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{error::ApiError, extract::AuthUser, AppState};
use crate::{auth::verify_password, storage::User};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("invalid nickname or password".to_string())
}

pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = payload?;
    let nickname = request.nickname.trim();
    if nickname.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "nickname and password are required".to_string(),
        ));
    }

    let user = state
        .db()
        .find_user_by_nickname(nickname)?
        .ok_or_else(invalid_credentials)?;

    let hash = user.password_hash.clone();
    let password = request.password;
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
    if !matches {
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(SessionResponse { token, user }))
}

/// Tokens are stateless; the client discards its copy.
pub async fn delete_session(AuthUser(user_id): AuthUser) -> StatusCode {
    info!(%user_id, "user logged out");
    StatusCode::NO_CONTENT
}
