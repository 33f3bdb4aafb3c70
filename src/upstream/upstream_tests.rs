// src/upstream/upstream_tests.rs

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use serde_json::{Value, json};

    use crate::model::filter::FilterClause;
    use crate::model::organization::LocationSummary;
    use crate::upstream::cache::CachedBackend;
    use crate::upstream::client::{AttendanceBackend, UpstreamClient, parse_count, parse_locations};
    use crate::upstream::context::{AuthProvider, QueryContext, StaticTokenProvider};
    use crate::upstream::error::UpstreamError;
    use crate::upstream::tracker::{RequestTracker, TrackerError};

    #[derive(Default)]
    struct CountingBackend {
        searches: AtomicUsize,
        counts: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl AttendanceBackend for CountingBackend {
        async fn search(&self, payload: &[FilterClause]) -> Result<Value, UpstreamError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UpstreamError::Status {
                    status: 503,
                    message: "down".into(),
                });
            }
            Ok(json!([{ "clauses": payload.len() }]))
        }

        async fn count(&self, _payload: &[FilterClause]) -> Result<u64, UpstreamError> {
            self.counts.fetch_add(1, Ordering::SeqCst);
            Ok(41)
        }

        async fn locations(&self, _code: &str) -> Result<Vec<LocationSummary>, UpstreamError> {
            Ok(vec![])
        }
    }

    fn payload(location: &str) -> Vec<FilterClause> {
        vec![
            FilterClause::eq("organizationCode", "MIDHANI"),
            FilterClause::eq("deployment.location.locationCode", location),
        ]
    }

    #[test]
    fn test_parse_count_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_count(&json!(12)).unwrap(), 12);
        assert_eq!(parse_count(&json!(12.0)).unwrap(), 12);
        assert_eq!(parse_count(&json!(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn test_parse_count_rejects_other_shapes() {
        for body in [json!(-1), json!(1.5), json!("many"), json!([1]), json!(null)] {
            match parse_count(&body) {
                Err(UpstreamError::UnexpectedShape(_)) => (),
                other => panic!("Expected UnexpectedShape for {body}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_locations() {
        let body = json!({
            "data": {
                "getOrganizationByCode": {
                    "organizationCode": "MIDHANI",
                    "locations": [
                        {"locationCode": "L1", "locationName": "Plant"},
                        {"locationCode": "L2"}
                    ]
                }
            }
        });

        let locations = parse_locations(body).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].location_name.as_deref(), Some("Plant"));
        assert_eq!(locations[1].location_name, None);
    }

    #[test]
    fn test_parse_locations_surfaces_graphql_errors() {
        let body = json!({"data": null, "errors": [{"message": "unknown org"}, {"message": "denied"}]});
        match parse_locations(body) {
            Err(UpstreamError::GraphQl(message)) => assert_eq!(message, "unknown org; denied"),
            other => panic!("Expected GraphQl error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_locations_missing_organization_is_empty() {
        let body = json!({"data": {"getOrganizationByCode": null}});
        assert!(parse_locations(body).unwrap().is_empty());
    }

    #[test]
    fn test_static_token_provider() {
        assert_eq!(
            StaticTokenProvider::new("abc").bearer_token().as_deref(),
            Some("abc")
        );
        assert_eq!(StaticTokenProvider::new("").bearer_token(), None);
    }

    #[test]
    fn test_client_signs_with_context_provider() {
        let context = QueryContext::new(
            "Midhani",
            Arc::new(StaticTokenProvider::new("abc")),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );

        let client = UpstreamClient::new(
            "http://attendance.local/",
            Duration::from_secs(5),
            context.auth_provider.clone(),
        )
        .unwrap();

        assert_eq!(Arc::strong_count(&context.auth_provider), 2);
        assert_eq!(context.auth_provider.bearer_token().as_deref(), Some("abc"));
        drop(client);
        assert_eq!(Arc::strong_count(&context.auth_provider), 1);
    }

    #[test]
    fn test_cache_reuses_identical_payloads() {
        let inner = Arc::new(CountingBackend::default());
        let cached = CachedBackend::new(inner.clone(), 100, Duration::from_secs(60));

        block_on(async {
            cached.search(&payload("L1")).await.unwrap();
            cached.search(&payload("L1")).await.unwrap();
            cached.search(&payload("L2")).await.unwrap();
            assert_eq!(cached.count(&payload("L1")).await.unwrap(), 41);
            assert_eq!(cached.count(&payload("L1")).await.unwrap(), 41);
        });

        assert_eq!(inner.searches.load(Ordering::SeqCst), 2);
        assert_eq!(inner.counts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cache_does_not_keep_failures() {
        let inner = Arc::new(CountingBackend {
            fail: true,
            ..Default::default()
        });
        let cached = CachedBackend::new(inner.clone(), 100, Duration::from_secs(60));

        block_on(async {
            assert!(cached.search(&payload("L1")).await.is_err());
            assert!(cached.search(&payload("L1")).await.is_err());
        });

        assert_eq!(inner.searches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_tracker_aborts_superseded_request() {
        let tracker = RequestTracker::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let first = tracker.run("7:summary", "location:L1", async move { rx.await.unwrap_or(0) });
        let second = tracker.run("7:summary", "location:L2", async { 2u32 });

        let (first, second) = block_on(async { futures::join!(first, second) });

        assert_eq!(second, Ok(2));
        assert_eq!(
            first,
            Err(TrackerError::Superseded {
                slot: "7:summary".into(),
                selector: "location:L1".into(),
            })
        );
        assert_eq!(tracker.in_flight(), 0);
        drop(tx);
    }

    #[test]
    fn test_tracker_slots_are_independent() {
        let tracker = RequestTracker::new();

        let a = tracker.run("7:summary", "location:L1", async { "a" });
        let b = tracker.run("8:summary", "location:L1", async { "b" });

        let (a, b) = block_on(async { futures::join!(a, b) });
        assert_eq!(a, Ok("a"));
        assert_eq!(b, Ok("b"));
        assert_eq!(tracker.in_flight(), 0);
    }
}
