//! Unit tests for the TTL cache and TTL policy

use super::*;
use std::{sync::Arc, thread};

#[cfg(test)]
mod ttl_cache_tests {
    use super::*;

    #[test]
    fn test_put_then_get_returns_payload() {
        let cache = TtlCache::new();
        cache.put("/nba/v1/teams", Bytes::from_static(b"{\"data\":[]}"), Duration::from_secs(60));

        assert_eq!(
            cache.get("/nba/v1/teams"),
            Some(Bytes::from_static(b"{\"data\":[]}"))
        );
    }

    #[test]
    fn test_missing_key_is_miss() {
        let cache = TtlCache::new();
        assert_eq!(cache.get("/nba/v1/players?per_page=25"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_valid_strictly_before_expiry() {
        let cache = TtlCache::new();
        let start = Instant::now();
        let ttl = Duration::from_secs(300);
        cache.put_at("key".to_string(), Bytes::from_static(b"v"), ttl, start);

        assert!(cache.get_at("key", start).is_some());
        assert!(cache.get_at("key", start + ttl - Duration::from_millis(1)).is_some());
        // Exactly at the expiry instant the entry is stale.
        assert!(cache.get_at("key", start + ttl).is_none());
        assert!(cache.get_at("key", start + ttl + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_expired_entry_stays_until_overwritten() {
        let cache = TtlCache::new();
        let start = Instant::now();
        cache.put_at("key".to_string(), Bytes::from_static(b"old"), Duration::from_secs(1), start);

        let later = start + Duration::from_secs(5);
        assert!(cache.get_at("key", later).is_none());
        assert_eq!(cache.len(), 1);

        cache.put_at("key".to_string(), Bytes::from_static(b"new"), Duration::from_secs(1), later);
        assert_eq!(cache.get_at("key", later), Some(Bytes::from_static(b"new")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_is_immediately_stale() {
        let cache = TtlCache::new();
        cache.put("key", Bytes::from_static(b"v"), Duration::ZERO);
        assert!(cache.get("key").is_none());
    }

    #[test]
    fn test_real_clock_expiry() {
        let cache = TtlCache::new();
        cache.put("key", Bytes::from_static(b"v"), Duration::from_millis(20));
        assert!(cache.get("key").is_some());

        thread::sleep(Duration::from_millis(40));
        assert!(cache.get("key").is_none());
    }

    #[test]
    fn test_keys_include_query_string() {
        let cache = TtlCache::new();
        cache.put("/nba/v1/players?per_page=25", Bytes::from_static(b"all"), Duration::from_secs(60));
        cache.put(
            "/nba/v1/players?per_page=25&team_ids[]=5",
            Bytes::from_static(b"team5"),
            Duration::from_secs(60),
        );

        assert_eq!(cache.get("/nba/v1/players?per_page=25").unwrap(), "all");
        assert_eq!(
            cache.get("/nba/v1/players?per_page=25&team_ids[]=5").unwrap(),
            "team5"
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_readers_and_writers_see_complete_values() {
        let cache = Arc::new(TtlCache::new());
        let payloads: Vec<Bytes> = (0..4)
            .map(|i| Bytes::from(vec![b'a' + i as u8; 4096]))
            .collect();

        let writers: Vec<_> = payloads
            .iter()
            .cloned()
            .map(|payload| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for _ in 0..200 {
                        cache.put("shared", payload.clone(), Duration::from_secs(60));
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let payloads = payloads.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        if let Some(value) = cache.get("shared") {
                            assert!(payloads.contains(&value), "observed a torn value");
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        assert!(payloads.contains(&cache.get("shared").unwrap()));
    }
}

#[cfg(test)]
mod ttl_policy_tests {
    use super::*;

    fn nba_policy() -> TtlPolicy {
        TtlPolicy::new(Duration::from_secs(300)).with_rule("/nba/v1/teams", Duration::from_secs(3600))
    }

    #[test]
    fn test_team_list_gets_long_ttl() {
        assert_eq!(nba_policy().ttl_for("/nba/v1/teams"), Duration::from_secs(3600));
    }

    #[test]
    fn test_other_endpoints_get_default_ttl() {
        let policy = nba_policy();
        assert_eq!(
            policy.ttl_for("/nba/v1/players?per_page=25"),
            Duration::from_secs(300)
        );
        assert_eq!(
            policy.ttl_for("/nba/v1/season_averages?season=2024&player_ids[]=237"),
            Duration::from_secs(300)
        );
        assert_ne!(
            policy.ttl_for("/nba/v1/teams"),
            policy.ttl_for("/nba/v1/players?per_page=25")
        );
    }

    #[test]
    fn test_rule_matches_route_ignoring_query() {
        assert_eq!(
            nba_policy().ttl_for("/nba/v1/teams?conference=East"),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn test_rule_does_not_match_sub_resources() {
        assert_eq!(nba_policy().ttl_for("/nba/v1/teams/14"), Duration::from_secs(300));
    }

    #[test]
    fn test_policy_is_extensible() {
        let policy = nba_policy().with_rule("/nba/v1/games", Duration::from_secs(30));

        assert_eq!(policy.rules().len(), 2);
        assert_eq!(policy.ttl_for("/nba/v1/games?dates[]=2024-11-01"), Duration::from_secs(30));
        assert_eq!(policy.default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let policy = TtlPolicy::new(Duration::from_secs(1))
            .with_rule("/a", Duration::from_secs(10))
            .with_rule("/a", Duration::from_secs(20));
        assert_eq!(policy.ttl_for("/a"), Duration::from_secs(10));
    }
}
