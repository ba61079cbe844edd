//! Cached accessors for the statistics API.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    http::UpstreamFetcher,
    teams::TeamDirectory,
    types::{ListResponse, Player, SeasonAverage, Team},
};
use crate::cli::types::{PlayerId, Season, TeamId};
use crate::config::NbaConfig;
use crate::core::{TtlCache, TtlPolicy};
use crate::{BuzzerError, Result};

#[cfg(test)]
mod tests;

pub const TEAMS_PATH: &str = "/nba/v1/teams";
pub const PLAYERS_PATH: &str = "/nba/v1/players";
pub const SEASON_AVERAGES_PATH: &str = "/nba/v1/season_averages";

/// Page size requested from the players endpoint.
pub const PLAYERS_PER_PAGE: u32 = 25;

/// `/nba/v1/players?per_page=25`, scoped to one team when `team` is a positive id.
pub fn players_path(team: Option<TeamId>) -> String {
    let mut path = format!("{PLAYERS_PATH}?per_page={PLAYERS_PER_PAGE}");
    if let Some(team) = team.filter(TeamId::is_positive) {
        path.push_str(&format!("&team_ids[]={team}"));
    }
    path
}

pub fn season_averages_path(player: PlayerId, season: Season) -> String {
    format!("{SEASON_AVERAGES_PATH}?season={season}&player_ids[]={player}")
}

/// Client for the statistics API with a per-path response cache.
///
/// Construct one per process and share it (it is `Send + Sync`).
pub struct NbaClient {
    fetcher: UpstreamFetcher,
    cache: TtlCache,
    ttl_policy: TtlPolicy,
    directory: &'static TeamDirectory,
}

impl NbaClient {
    pub fn new(config: &NbaConfig) -> Result<Self> {
        let ttl_policy =
            TtlPolicy::new(config.default_ttl).with_rule(TEAMS_PATH, config.teams_ttl);
        Ok(Self::with_parts(UpstreamFetcher::new(config)?, ttl_policy))
    }

    pub fn with_parts(fetcher: UpstreamFetcher, ttl_policy: TtlPolicy) -> Self {
        Self {
            fetcher,
            cache: TtlCache::new(),
            ttl_policy,
            directory: TeamDirectory::standard(),
        }
    }

    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl_policy
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Serve `path` from the cache, or fetch it and cache the body.
    ///
    /// Failed fetches are not cached.
    async fn request(&self, path: &str) -> Result<Bytes> {
        if let Some(payload) = self.cache.get(path) {
            debug!(path, "cache hit");
            return Ok(payload);
        }

        debug!(path, "cache miss");
        let body = self.fetcher.fetch(path).await?;
        let ttl = self.ttl_policy.ttl_for(path);
        self.cache.put(path, body.clone(), ttl);
        Ok(body)
    }

    async fn request_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let body = self.request(path).await?;
        let response: ListResponse<T> = serde_json::from_slice(&body)?;
        Ok(response.data)
    }

    /// The 30 active franchises, enriched with display metadata.
    pub async fn get_teams(&self) -> Result<Vec<Team>> {
        let teams = self.request_list::<Team>(TEAMS_PATH).await?;
        Ok(self.directory.filter_active_teams(teams))
    }

    /// First page of players, optionally limited to one team.
    pub async fn get_players(&self, team: Option<TeamId>) -> Result<Vec<Player>> {
        self.request_list(&players_path(team)).await
    }

    /// Season averages of one player.
    ///
    /// Returns [`BuzzerError::NotFound`] when upstream has no row for that
    /// player and season.
    pub async fn get_player_season_averages(
        &self,
        player: PlayerId,
        season: Season,
    ) -> Result<SeasonAverage> {
        self.request_list::<SeasonAverage>(&season_averages_path(player, season))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BuzzerError::NotFound {
                what: "season averages".to_string(),
            })
    }
}
