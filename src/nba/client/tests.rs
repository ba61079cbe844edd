//! Unit tests for the cached NBA accessors

use super::*;
use crate::nba::teams::ACTIVE_TEAM_NAMES;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> NbaClient {
    let mut config = NbaConfig::new("test-api-key");
    config.base_url = server.uri();
    NbaClient::new(&config).unwrap()
}

fn team_json(id: i64, full_name: &str, conference: &str) -> Value {
    json!({
        "id": id,
        "conference": conference,
        "division": "",
        "city": "",
        "name": full_name.rsplit(' ').next().unwrap_or_default(),
        "full_name": full_name,
        "abbreviation": ""
    })
}

fn upstream_teams() -> Value {
    let mut data: Vec<Value> = ACTIVE_TEAM_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| team_json(i as i64 + 1, name, "East"))
        .collect();
    data.push(team_json(37, "Chicago Stags", ""));
    data.push(team_json(38, "Boston Celtics", ""));
    json!({ "data": data, "meta": { "per_page": 45 } })
}

#[test]
fn test_players_path_without_team_filter() {
    assert_eq!(players_path(None), "/nba/v1/players?per_page=25");
    assert_eq!(players_path(Some(TeamId::new(0))), "/nba/v1/players?per_page=25");
    assert!(!players_path(Some(TeamId::new(-1))).contains("team_ids"));
}

#[test]
fn test_players_path_with_team_filter() {
    assert_eq!(
        players_path(Some(TeamId::new(5))),
        "/nba/v1/players?per_page=25&team_ids[]=5"
    );
}

#[test]
fn test_season_averages_path() {
    assert_eq!(
        season_averages_path(PlayerId::new(237), Season::new(2024)),
        "/nba/v1/season_averages?season=2024&player_ids[]=237"
    );
}

#[test]
fn test_ttl_policy_from_config() {
    let config = NbaConfig::new("key");
    let client = NbaClient::new(&config).unwrap();
    let policy = client.ttl_policy();

    assert_eq!(policy.ttl_for(TEAMS_PATH), Duration::from_secs(3600));
    assert_eq!(policy.ttl_for(&players_path(None)), Duration::from_secs(300));
    assert_eq!(
        policy.ttl_for(&season_averages_path(PlayerId::new(1), Season::default())),
        Duration::from_secs(300)
    );
}

#[tokio::test]
async fn test_get_teams_filters_and_enriches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_teams()))
        .mount(&mock_server)
        .await;

    let teams = client_for(&mock_server).get_teams().await.unwrap();

    assert_eq!(teams.len(), 30);
    assert!(teams.iter().all(|t| t.id.as_i64() <= 30));
    assert!(teams.iter().all(|t| !t.logo_url.is_empty()));
    assert_eq!(teams[0].full_name, "Atlanta Hawks");
    assert_eq!(teams[0].localized_name, "亚特兰大老鹰");
}

#[tokio::test]
async fn test_second_call_is_served_from_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_teams()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.get_teams().await.unwrap();
    let second = client.get_teams().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = NbaConfig::new("test-api-key");
    config.base_url = mock_server.uri();
    config.default_ttl = Duration::from_millis(30);
    let client = NbaClient::new(&config).unwrap();

    client.get_players(None).await.unwrap();
    client.get_players(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    client.get_players(None).await.unwrap();
}

#[tokio::test]
async fn test_get_players_team_filter_reaches_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/players"))
        .and(query_param("per_page", "25"))
        .and(query_param("team_ids[]", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 19,
                "first_name": "Zach",
                "last_name": "Example",
                "position": "G",
                "team": team_json(5, "Chicago Bulls", "East")
            }],
            "meta": { "next_cursor": 20, "per_page": 25 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let players = client_for(&mock_server)
        .get_players(Some(TeamId::new(5)))
        .await
        .unwrap();

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id, PlayerId::new(19));
    assert_eq!(players[0].team.full_name, "Chicago Bulls");
    // Player lists are returned as-is, without team enrichment.
    assert!(players[0].team.logo_url.is_empty());
}

#[tokio::test]
async fn test_team_filters_are_cached_separately() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.get_players(None).await.unwrap();
    client.get_players(Some(TeamId::new(5))).await.unwrap();
    client.get_players(Some(TeamId::new(0))).await.unwrap();

    assert_eq!(client.cached_entries(), 2);
}

#[tokio::test]
async fn test_season_averages_returns_first_row() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/season_averages"))
        .and(query_param("season", "2023"))
        .and(query_param("player_ids[]", "237"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "player_id": 237, "season": 2023, "games_played": 71, "pts": 25.7, "min": "35:18" }]
        })))
        .mount(&mock_server)
        .await;

    let avg = client_for(&mock_server)
        .get_player_season_averages(PlayerId::new(237), Season::new(2023))
        .await
        .unwrap();

    assert_eq!(avg.player_id, 237);
    assert_eq!(avg.games_played, 71);
    assert_eq!(avg.min, "35:18");
}

#[tokio::test]
async fn test_season_averages_empty_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/season_averages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "meta": {} })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .get_player_season_averages(PlayerId::new(1), Season::new(1950))
        .await;

    assert!(matches!(result, Err(BuzzerError::NotFound { .. })));
}

#[tokio::test]
async fn test_upstream_error_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_teams()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    assert!(matches!(
        client.get_teams().await,
        Err(BuzzerError::UpstreamStatus { status: 503 })
    ));
    assert_eq!(client.cached_entries(), 0);

    assert_eq!(client.get_teams().await.unwrap().len(), 30);
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_teams().await;
    assert!(matches!(result, Err(BuzzerError::Decode(_))));
}

#[tokio::test]
async fn test_concurrent_misses_may_fetch_redundantly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nba/v1/teams"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_teams())
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&mock_server)
        .await;

    let client = std::sync::Arc::new(client_for(&mock_server));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = std::sync::Arc::clone(&client);
            tokio::spawn(async move { client.get_teams().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().len(), 30);
    }
    let calls = mock_server.received_requests().await.unwrap().len();
    assert!((1..=4).contains(&calls));
    assert_eq!(client.cached_entries(), 1);
}
