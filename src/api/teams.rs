use axum::{extract::State, Json};

use super::{error::ApiError, AppState};
use crate::storage::LocalTeam;

/// Home teams offered at registration.
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<LocalTeam>>, ApiError> {
    let teams = state.db().list_teams()?;
    Ok(Json(teams))
}
