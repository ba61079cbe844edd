//! Pass-through routes for the upstream statistics client

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error::ApiError, extract::AuthUser, AppState};
use crate::{
    cli::types::{PlayerId, Season, TeamId},
    nba::{Player, SeasonAverage, Team},
};

#[derive(Debug, Default, Deserialize)]
pub struct PlayersQuery {
    pub team_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub season: Option<String>,
}

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    Ok(Json(state.nba.get_teams().await?))
}

/// An unparseable `team_id` is treated as no filter.
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let team = query
        .team_id
        .as_deref()
        .and_then(|raw| raw.parse::<TeamId>().ok());

    Ok(Json(state.nba.get_players(team).await?))
}

pub async fn player_stats(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<SeasonAverage>, ApiError> {
    let player: PlayerId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid player id: {id}")))?;
    let season = query
        .season
        .as_deref()
        .and_then(|raw| raw.parse::<Season>().ok())
        .unwrap_or_default();

    Ok(Json(
        state.nba.get_player_season_averages(player, season).await?,
    ))
}
