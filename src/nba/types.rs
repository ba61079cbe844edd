use crate::cli::types::{PlayerId, TeamId};
use serde::{Deserialize, Deserializer, Serialize};


/// Upstream sends `null` for fields that historical records never had.
fn de_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`de_null_as_empty`] for any field with a zero value.
fn de_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pagination block of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Meta {
    #[serde(default)]
    pub next_cursor: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

/// Top-level envelope of every list endpoint: `{ "data": [...], "meta": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Meta,
}

/// NBA team as returned by upstream, plus locally enriched display fields
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub conference: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub division: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub full_name: String,
    /// Simplified Chinese display name
    #[serde(rename = "full_name_zh", default, deserialize_with = "de_null_as_empty")]
    pub localized_name: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub abbreviation: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub logo_url: String,
    /// Background color that goes with the logo, `#RRGGBB`
    #[serde(rename = "bg_color", default, deserialize_with = "de_null_as_empty")]
    pub brand_color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub height: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub weight: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub jersey_number: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub college: String,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub country: String,
    /// `None` for undrafted players
    #[serde(default)]
    pub draft_year: Option<u16>,
    #[serde(default)]
    pub draft_round: Option<u8>,
    #[serde(default)]
    pub draft_number: Option<u16>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub team: Team,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Per-game averages of one player over one season
///
/// Upstream sends `null` for stats a player never recorded; those decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SeasonAverage {
    #[serde(deserialize_with = "de_null_as_default")]
    pub player_id: i64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub season: u16,
    #[serde(deserialize_with = "de_null_as_default")]
    pub games_played: u32,
    #[serde(deserialize_with = "de_null_as_default")]
    pub pts: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub ast: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub reb: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub stl: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub blk: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub turnover: f64,
    /// Minutes per game as formatted upstream, e.g. `"34:12"`
    #[serde(deserialize_with = "de_null_as_empty")]
    pub min: String,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fgm: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fga: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fg_pct: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fg3m: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fg3a: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fg3_pct: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub ftm: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub fta: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub ft_pct: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub oreb: f64,
    #[serde(deserialize_with = "de_null_as_default")]
    pub dreb: f64,
}
