//! Request extractors

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{error::ApiError, AppState};
use crate::cli::types::UserId;

/// The authenticated caller, taken from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing, malformed, or carries an
/// invalid or expired token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(ApiError::unauthorized)?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.split_once(' '))
            .filter(|(scheme, token)| *scheme == "Bearer" && !token.trim().is_empty())
            .map(|(_, token)| token.trim())
            .ok_or_else(|| ApiError::Unauthorized("malformed authorization header".to_string()))?;

        state
            .tokens
            .verify(token)
            .map(AuthUser)
            .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))
    }
}
