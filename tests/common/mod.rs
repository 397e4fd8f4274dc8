#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use snaplink::application::services::CachePolicy;
use snaplink::domain::entities::{BaseUrl, NewUrlRecord, UrlRecord};
use snaplink::domain::repositories::UrlRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::cache::{CacheError, CacheResult, CacheService};
use snaplink::routes::router;
use snaplink::state::AppState;
use snaplink::utils::db_error::{CODE_CONSTRAINT, LONG_URL_CONSTRAINT};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const BASE_URL: &str = "https://s.example.com";

/// Store fake keyed by code, enforcing both unique indexes.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: Mutex<HashMap<String, UrlRecord>>,
    failing: AtomicBool,
    stalled: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as an unreachable store would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes `health_check` hang far past any deadline.
    pub fn set_stalled(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);
    }

    pub fn clicks(&self, code: &str) -> Option<i64> {
        self.records.lock().unwrap().get(code).map(|r| r.clicks)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlRecord>, AppError> {
        self.check_available()?;
        let records = self.records.lock().unwrap();
        Ok(records.values().find(|r| r.long_url == long_url).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.check_available()?;
        Ok(self.records.lock().unwrap().get(code).cloned())
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();

        if records.contains_key(&new_record.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": CODE_CONSTRAINT }),
            ));
        }
        if records.values().any(|r| r.long_url == new_record.long_url) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": LONG_URL_CONSTRAINT }),
            ));
        }

        let record = new_record.into_record(Utc::now());
        records.insert(record.code.clone(), record.clone());
        Ok(record)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        self.check_available()?;
        if let Some(record) = self.records.lock().unwrap().get_mut(code) {
            record.clicks += 1;
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        if self.stalled.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(600)).await;
        }
        !self.failing.load(Ordering::SeqCst)
    }
}

/// TTL cache on the tokio clock, so paused-time tests can expire entries.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    sets: AtomicUsize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(code)
            .is_some_and(|(_, expires_at)| Instant::now() < *expires_at)
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(short_code) {
            Some((url, expires_at)) if Instant::now() < *expires_at => Ok(Some(url.clone())),
            Some(_) => {
                entries.remove(short_code);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_url(&self, short_code: &str, long_url: &str, ttl_seconds: u64) -> CacheResult<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), (long_url.to_string(), expires_at));
        self.sets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Cache whose every call fails.
pub struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set_url(&self, _short_code: &str, _long_url: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

/// Cache that answers with a wrong URL, but only after every deadline has passed.
pub struct StalledCache;

#[async_trait]
impl CacheService for StalledCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Some("https://stale.example.org/".to_string()))
    }

    async fn set_url(&self, _short_code: &str, _long_url: &str, _ttl_seconds: u64) -> CacheResult<()> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        tokio::time::sleep(Duration::from_secs(600)).await;
        true
    }

    fn backend(&self) -> &'static str {
        "stalled"
    }
}

pub fn create_test_state(
    repository: Arc<InMemoryUrlRepository>,
    cache: Arc<dyn CacheService>,
    policy: CachePolicy,
) -> AppState {
    let base_url = BaseUrl::parse(BASE_URL).unwrap();
    AppState::new(repository, cache, base_url, policy)
}

pub fn create_test_server(
    repository: Arc<InMemoryUrlRepository>,
    cache: Arc<dyn CacheService>,
) -> TestServer {
    let state = create_test_state(repository, cache, CachePolicy::default());
    TestServer::new(router(state)).unwrap()
}

/// Shortens `long_url` and returns the assigned code.
pub async fn shorten(server: &TestServer, long_url: &str) -> String {
    let response = server
        .post("/api/url/shorten")
        .json(&json!({ "longUrl": long_url }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    body["code"].as_str().unwrap().to_string()
}
