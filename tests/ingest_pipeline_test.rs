//! End-to-end tests for the ingestion pipeline
//!
//! Scripted page sources drive the larger scenarios; a mockito server covers
//! the real HTTP client path.

use async_trait::async_trait;
use fake::faker::address::en::CityName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use mockito::{Matcher, Server};
use roster::adapters::database::UserStore;
use roster::adapters::memory::MemoryUserStore;
use roster::adapters::randomuser::{PageSource, RawUser};
use roster::config::UpstreamConfig;
use roster::core::ingest::IngestCoordinator;
use roster::domain::{Result, RosterError, UpstreamError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

fn fake_user() -> RawUser {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let email: String = SafeEmail().fake();
    let city: String = CityName().fake();
    RawUser::new(&uuid::Uuid::new_v4().to_string(), &first, &last, &email, &city)
}

fn fast_config(total_pages: u32, results_per_page: u32) -> UpstreamConfig {
    UpstreamConfig {
        total_pages,
        results_per_page,
        retry_delay_ms: 0,
        page_delay_ms: 0,
        ..Default::default()
    }
}

fn page_of(url: &Url) -> u32 {
    url.query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
        .expect("page query parameter")
}

/// Per-page scripted outcomes; pages without a script return `default_size`
/// fresh users. Every page's generated users are fixed on first request so a
/// second run sees the same data.
struct ScriptedUpstream {
    default_size: usize,
    scripts: Mutex<HashMap<u32, Vec<Result<Vec<RawUser>>>>>,
    cache: Mutex<HashMap<u32, Vec<RawUser>>>,
    attempts: Mutex<HashMap<u32, u32>>,
}

impl ScriptedUpstream {
    fn new(default_size: usize) -> Self {
        Self {
            default_size,
            scripts: Mutex::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    fn script(self, page: u32, outcomes: Vec<Result<Vec<RawUser>>>) -> Self {
        self.scripts.lock().unwrap().insert(page, outcomes);
        self
    }

    fn attempts(&self, page: u32) -> u32 {
        self.attempts.lock().unwrap().get(&page).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PageSource for ScriptedUpstream {
    async fn fetch_page(&self, url: &Url) -> Result<Vec<RawUser>> {
        let page = page_of(url);
        *self.attempts.lock().unwrap().entry(page).or_insert(0) += 1;

        if let Some(outcomes) = self.scripts.lock().unwrap().get_mut(&page) {
            if !outcomes.is_empty() {
                return outcomes.remove(0);
            }
            return Ok(Vec::new());
        }

        let mut cache = self.cache.lock().unwrap();
        let users = cache
            .entry(page)
            .or_insert_with(|| (0..self.default_size).map(|_| fake_user()).collect());
        Ok(users.clone())
    }
}

fn transient() -> Result<Vec<RawUser>> {
    Err(RosterError::Upstream(UpstreamError::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    }))
}

#[tokio::test]
async fn test_full_run_with_transient_failure_on_last_page() {
    let last_page: Vec<RawUser> = (0..19).map(|_| fake_user()).collect();
    let upstream = Arc::new(ScriptedUpstream::new(20).script(50, vec![transient(), Ok(last_page)]));
    let store = Arc::new(MemoryUserStore::new());

    let coordinator =
        IngestCoordinator::with_source(&fast_config(50, 20), upstream.clone(), store.clone())
            .unwrap();
    let summary = coordinator.run(false).await.unwrap();

    assert_eq!(summary.fetched_count, 999);
    assert_eq!(summary.inserted_count, 999);
    assert_eq!(summary.pages_succeeded.len(), 50);
    assert!(summary.pages_failed.is_empty());
    assert_eq!(upstream.attempts(50), 2);
    assert_eq!(upstream.attempts(1), 1);
    assert_eq!(store.len().await, 999);
}

#[tokio::test]
async fn test_failing_page_is_attempted_exactly_three_times() {
    let upstream = Arc::new(
        ScriptedUpstream::new(5)
            .script(2, vec![transient(), transient(), transient(), transient()])
            .script(3, vec![Ok(Vec::new()), Ok(Vec::new()), Ok(Vec::new()), Ok(vec![fake_user()])]),
    );
    let store = Arc::new(MemoryUserStore::new());

    let coordinator =
        IngestCoordinator::with_source(&fast_config(4, 5), upstream.clone(), store.clone()).unwrap();
    let summary = coordinator.run(false).await.unwrap();

    assert_eq!(upstream.attempts(2), 3);
    assert_eq!(upstream.attempts(3), 3);
    assert_eq!(summary.pages_failed, vec![2, 3]);
    assert_eq!(summary.pages_succeeded, vec![1, 4]);
    assert_eq!(summary.fetched_count, 10);
}

#[tokio::test]
async fn test_second_run_inserts_nothing() {
    let upstream = Arc::new(ScriptedUpstream::new(20));
    let store = Arc::new(MemoryUserStore::new());
    let coordinator =
        IngestCoordinator::with_source(&fast_config(5, 20), upstream, store.clone()).unwrap();

    let first = coordinator.run(false).await.unwrap();
    let second = coordinator.run(false).await.unwrap();

    assert_eq!(first.fetched_count, 100);
    assert_eq!(first.inserted_count, 100);
    assert_eq!(second.fetched_count, 100);
    assert_eq!(second.inserted_count, 0);
    assert_eq!(store.len().await, 100);
}

#[tokio::test]
async fn test_all_pages_empty_writes_nothing() {
    let upstream = Arc::new(ScriptedUpstream::new(0));
    let store = Arc::new(MemoryUserStore::new());
    let coordinator =
        IngestCoordinator::with_source(&fast_config(3, 20), upstream.clone(), store.clone())
            .unwrap();

    let summary = coordinator.run(false).await.unwrap();

    assert_eq!(summary.fetched_count, 0);
    assert_eq!(summary.inserted_count, 0);
    assert_eq!(summary.pages_failed, vec![1, 2, 3]);
    assert_eq!(upstream.attempts(1), 3);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_record_aborts_without_writing() {
    let mut broken = fake_user();
    broken.location = None;

    let upstream = Arc::new(ScriptedUpstream::new(20).script(2, vec![Ok(vec![fake_user(), broken])]));
    let store = Arc::new(MemoryUserStore::new());
    let coordinator =
        IngestCoordinator::with_source(&fast_config(3, 20), upstream, store.clone()).unwrap();

    let err = coordinator.run(false).await.unwrap_err();

    match err {
        RosterError::Transform(msg) => {
            // page 1 contributes 20 records, so the broken one is index 21
            assert!(msg.contains("record 21"), "{msg}");
            assert!(msg.contains("location.city"), "{msg}");
        }
        other => panic!("Expected transform error, got {other:?}"),
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_http_pipeline_against_mock_upstream() {
    let mut server = Server::new_async().await;

    let page_body = |ids: &[&str]| {
        let results: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "login": {"uuid": id},
                    "name": {"title": "Mx", "first": "Test", "last": id},
                    "email": format!("{id}@example.com"),
                    "location": {"city": "Nowhere", "postcode": 1234}
                })
            })
            .collect();
        serde_json::json!({ "results": results, "info": {"seed": "x"} }).to_string()
    };

    let page1 = server
        .mock("GET", "/api/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("results".into(), "2".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["a", "b"]))
        .expect(1)
        .create_async()
        .await;

    let page2 = server
        .mock("GET", "/api/")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(500)
        .with_body("upstream exploded")
        .expect(3)
        .create_async()
        .await;

    let page3 = server
        .mock("GET", "/api/")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        // overlaps page 1
        .with_body(page_body(&["b", "c"]))
        .expect(1)
        .create_async()
        .await;

    let config = UpstreamConfig {
        base_url: format!("{}/api/", server.url()),
        ..fast_config(3, 2)
    };
    let store = Arc::new(MemoryUserStore::new());
    let coordinator = IngestCoordinator::new(&config, store.clone()).unwrap();

    let summary = coordinator.run(false).await.unwrap();

    assert_eq!(summary.fetched_count, 4);
    assert_eq!(summary.inserted_count, 3);
    assert_eq!(summary.pages_failed, vec![2]);

    let users = store.list_users().await.unwrap();
    assert_eq!(users[0].name, "Test a");
    assert_eq!(users[0].email, "a@example.com");
    assert_eq!(users[0].city, "Nowhere");

    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
}
