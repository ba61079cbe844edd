//! End-to-end tests of the cached NBA client against a mock upstream

use buzzerbeater::{config::NbaConfig, nba::NbaClient, BuzzerError, PlayerId, Season, TeamId};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(server: &MockServer) -> NbaConfig {
    let mut config = NbaConfig::new("integration-key");
    config.base_url = server.uri();
    config.request_timeout = Duration::from_secs(2);
    config
}

#[tokio::test]
async fn test_teams_are_cached_per_policy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .and(header("authorization", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 2, "conference": "East", "full_name": "Boston Celtics", "abbreviation": "BOS" },
                { "id": 38, "conference": "", "full_name": "Boston Celtics", "abbreviation": "BOS" },
                { "id": 45, "conference": "East", "full_name": "Baltimore Bullets", "abbreviation": "BAL" }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.teams_ttl = Duration::from_millis(200);
    let client = NbaClient::new(&config).unwrap();

    let first = client.get_teams().await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, TeamId::new(2));
    assert_eq!(first[0].brand_color, "#007A33");

    let cached = client.get_teams().await.unwrap();
    assert_eq!(cached, first);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let refreshed = client.get_teams().await.unwrap();
    assert_eq!(refreshed, first);
}

#[tokio::test]
async fn test_players_and_averages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nba/v1/players"))
        .and(query_param("per_page", "25"))
        .and(query_param("team_ids[]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 434, "first_name": "Jayson", "last_name": "Tatum", "position": "F",
                "draft_year": 2017, "draft_round": 1, "draft_number": 3,
                "team": { "id": 2, "conference": "East", "full_name": "Boston Celtics" }
            }],
            "meta": { "next_cursor": 435, "per_page": 25 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nba/v1/season_averages"))
        .and(query_param("season", "2023"))
        .and(query_param("player_ids[]", "434"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "player_id": 434, "season": 2023, "games_played": 74, "pts": 26.9, "min": "35:42" }]
        })))
        .mount(&server)
        .await;

    let client = NbaClient::new(&config_for(&server)).unwrap();

    let players = client.get_players(Some(TeamId::new(2))).await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].full_name(), "Jayson Tatum");
    assert_eq!(players[0].team.full_name, "Boston Celtics");

    let averages = client
        .get_player_season_averages(PlayerId::new(434), Season::new(2023))
        .await
        .unwrap();
    assert_eq!(averages.games_played, 74);
    assert_eq!(averages.min, "35:42");
    assert_eq!(client.cached_entries(), 2);
}

/// Base URL of a local port with no listener.
fn unbound_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let mut config = NbaConfig::new("integration-key");
    config.base_url = unbound_base_url();
    config.request_timeout = Duration::from_secs(2);

    let client = NbaClient::new(&config).unwrap();
    let err = client.get_teams().await.unwrap_err();
    assert!(err.is_upstream());
    assert!(matches!(err, BuzzerError::Transport(_)), "got {err:?}");
    assert_eq!(client.cached_entries(), 0);

    // Still nothing cached, so the retry goes upstream again.
    let retry = client.get_teams().await.unwrap_err();
    assert!(matches!(retry, BuzzerError::Transport(_)));
    assert_eq!(client.cached_entries(), 0);
}
