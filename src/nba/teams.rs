//! Active-franchise whitelist and display metadata for NBA teams.
//!
//! Upstream still lists relocated and defunct franchises. A record is kept
//! only when its full name is one of the 30 current teams and it carries a
//! conference; historical records have an empty conference.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::types::Team;

/// Full names of the 30 franchises active in the 2024-25 season.
pub const ACTIVE_TEAM_NAMES: [&str; 30] = [
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "LA Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

/// Locally maintained display data for one franchise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMetadata {
    pub full_name: &'static str,
    pub localized_name: &'static str,
    pub logo_url: &'static str,
    pub brand_color: &'static str,
}

const fn meta(
    full_name: &'static str,
    localized_name: &'static str,
    logo_url: &'static str,
    brand_color: &'static str,
) -> TeamMetadata {
    TeamMetadata {
        full_name,
        localized_name,
        logo_url,
        brand_color,
    }
}

// Logos are the transparent 500px PNGs from the ESPN CDN.
pub const TEAM_METADATA: [TeamMetadata; 30] = [
    meta("Atlanta Hawks", "亚特兰大老鹰", "https://a.espncdn.com/i/teamlogos/nba/500/atl.png", "#E03A3E"),
    meta("Boston Celtics", "波士顿凯尔特人", "https://a.espncdn.com/i/teamlogos/nba/500/bos.png", "#007A33"),
    meta("Brooklyn Nets", "布鲁克林篮网", "https://a.espncdn.com/i/teamlogos/nba/500/bkn.png", "#000000"),
    meta("Charlotte Hornets", "夏洛特黄蜂", "https://a.espncdn.com/i/teamlogos/nba/500/cha.png", "#1D1160"),
    meta("Chicago Bulls", "芝加哥公牛", "https://a.espncdn.com/i/teamlogos/nba/500/chi.png", "#CE1141"),
    meta("Cleveland Cavaliers", "克利夫兰骑士", "https://a.espncdn.com/i/teamlogos/nba/500/cle.png", "#860038"),
    meta("Dallas Mavericks", "达拉斯独行侠", "https://a.espncdn.com/i/teamlogos/nba/500/dal.png", "#00538C"),
    meta("Denver Nuggets", "丹佛掘金", "https://a.espncdn.com/i/teamlogos/nba/500/den.png", "#0E2240"),
    meta("Detroit Pistons", "底特律活塞", "https://a.espncdn.com/i/teamlogos/nba/500/det.png", "#C8102E"),
    meta("Golden State Warriors", "金州勇士", "https://a.espncdn.com/i/teamlogos/nba/500/gs.png", "#1D428A"),
    meta("Houston Rockets", "休斯顿火箭", "https://a.espncdn.com/i/teamlogos/nba/500/hou.png", "#CE1141"),
    meta("Indiana Pacers", "印第安纳步行者", "https://a.espncdn.com/i/teamlogos/nba/500/ind.png", "#002D62"),
    meta("LA Clippers", "洛杉矶快船", "https://a.espncdn.com/i/teamlogos/nba/500/lac.png", "#C8102E"),
    meta("Los Angeles Lakers", "洛杉矶湖人", "https://a.espncdn.com/i/teamlogos/nba/500/lal.png", "#552583"),
    meta("Memphis Grizzlies", "孟菲斯灰熊", "https://a.espncdn.com/i/teamlogos/nba/500/mem.png", "#5D76A9"),
    meta("Miami Heat", "迈阿密热火", "https://a.espncdn.com/i/teamlogos/nba/500/mia.png", "#98002E"),
    meta("Milwaukee Bucks", "密尔沃基雄鹿", "https://a.espncdn.com/i/teamlogos/nba/500/mil.png", "#00471B"),
    meta("Minnesota Timberwolves", "明尼苏达森林狼", "https://a.espncdn.com/i/teamlogos/nba/500/min.png", "#0C2340"),
    meta("New Orleans Pelicans", "新奥尔良鹈鹕", "https://a.espncdn.com/i/teamlogos/nba/500/no.png", "#0C2340"),
    meta("New York Knicks", "纽约尼克斯", "https://a.espncdn.com/i/teamlogos/nba/500/ny.png", "#006BB6"),
    meta("Oklahoma City Thunder", "俄克拉荷马城雷霆", "https://a.espncdn.com/i/teamlogos/nba/500/okc.png", "#007AC1"),
    meta("Orlando Magic", "奥兰多魔术", "https://a.espncdn.com/i/teamlogos/nba/500/orl.png", "#0077C0"),
    meta("Philadelphia 76ers", "费城76人", "https://a.espncdn.com/i/teamlogos/nba/500/phi.png", "#006BB6"),
    meta("Phoenix Suns", "菲尼克斯太阳", "https://a.espncdn.com/i/teamlogos/nba/500/phx.png", "#1D1160"),
    meta("Portland Trail Blazers", "波特兰开拓者", "https://a.espncdn.com/i/teamlogos/nba/500/por.png", "#E03A3E"),
    meta("Sacramento Kings", "萨克拉门托国王", "https://a.espncdn.com/i/teamlogos/nba/500/sac.png", "#5A2D81"),
    meta("San Antonio Spurs", "圣安东尼奥马刺", "https://a.espncdn.com/i/teamlogos/nba/500/sa.png", "#C4CED4"),
    meta("Toronto Raptors", "多伦多猛龙", "https://a.espncdn.com/i/teamlogos/nba/500/tor.png", "#CE1141"),
    meta("Utah Jazz", "犹他爵士", "https://a.espncdn.com/i/teamlogos/nba/500/utah.png", "#002B5C"),
    meta("Washington Wizards", "华盛顿奇才", "https://a.espncdn.com/i/teamlogos/nba/500/wsh.png", "#002B5C"),
];

static STANDARD_DIRECTORY: LazyLock<TeamDirectory> = LazyLock::new(|| {
    TeamDirectory::new(ACTIVE_TEAM_NAMES.iter().copied(), TEAM_METADATA.iter().copied())
});

/// Read-only lookup of eligible franchises and their display metadata
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    active: HashSet<&'static str>,
    metadata: HashMap<&'static str, TeamMetadata>,
}

impl TeamDirectory {
    pub fn new(
        active: impl IntoIterator<Item = &'static str>,
        metadata: impl IntoIterator<Item = TeamMetadata>,
    ) -> Self {
        Self {
            active: active.into_iter().collect(),
            metadata: metadata.into_iter().map(|m| (m.full_name, m)).collect(),
        }
    }

    /// The built-in 30-team directory, built once per process.
    pub fn standard() -> &'static TeamDirectory {
        &STANDARD_DIRECTORY
    }

    pub fn is_active(&self, full_name: &str) -> bool {
        self.active.contains(full_name)
    }

    pub fn metadata(&self, full_name: &str) -> Option<&TeamMetadata> {
        self.metadata.get(full_name)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Keep active franchises in upstream order and attach display metadata.
    ///
    /// A whitelisted team without a metadata entry is kept with blank
    /// display fields.
    pub fn filter_active_teams(&self, teams: Vec<Team>) -> Vec<Team> {
        teams
            .into_iter()
            .filter(|team| self.is_active(&team.full_name) && !team.conference.is_empty())
            .map(|mut team| {
                if let Some(info) = self.metadata(&team.full_name) {
                    team.localized_name = info.localized_name.to_string();
                    team.logo_url = info.logo_url.to_string();
                    team.brand_color = info.brand_color.to_string();
                }
                team
            })
            .collect()
    }
}

/// [`TeamDirectory::filter_active_teams`] on the standard directory.
pub fn filter_active_teams(teams: Vec<Team>) -> Vec<Team> {
    TeamDirectory::standard().filter_active_teams(teams)
}
