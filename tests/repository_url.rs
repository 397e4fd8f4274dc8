//! PostgreSQL repository tests. Each test gets a fresh migrated database.
//!
//! `DATABASE_URL` must point at a server the test user may create databases on.

use sqlx::PgPool;
use snaplink::domain::entities::NewUrlRecord;
use snaplink::domain::repositories::UrlRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::PgUrlRepository;
use snaplink::utils::db_error::{CODE_CONSTRAINT, LONG_URL_CONSTRAINT};
use std::sync::Arc;

fn new_record(code: &str, long_url: &str) -> NewUrlRecord {
    NewUrlRecord {
        code: code.to_string(),
        long_url: long_url.to_string(),
        short_url: format!("https://s.example.com/{}", code),
    }
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let created = repo
        .insert(new_record("abc12345", "https://example.com/"))
        .await
        .unwrap();
    assert_eq!(created.code, "abc12345");
    assert_eq!(created.clicks, 0);
    assert_eq!(created.short_url, "https://s.example.com/abc12345");

    let by_code = repo.find_by_code("abc12345").await.unwrap().unwrap();
    assert_eq!(by_code, created);

    let by_url = repo
        .find_by_long_url("https://example.com/")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.code, "abc12345");
}

#[sqlx::test]
async fn test_find_missing(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("missing1").await.unwrap().is_none());
    assert!(
        repo.find_by_long_url("https://nowhere.example/")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
async fn test_duplicate_code_conflict(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.insert(new_record("dup00001", "https://example.com/a"))
        .await
        .unwrap();

    let err = repo
        .insert(new_record("dup00001", "https://example.com/b"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.conflicting_constraint(), Some(CODE_CONSTRAINT));
}

#[sqlx::test]
async fn test_duplicate_long_url_conflict(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.insert(new_record("first001", "https://example.com/same"))
        .await
        .unwrap();

    let err = repo
        .insert(new_record("second01", "https://example.com/same"))
        .await
        .unwrap_err();

    assert_eq!(err.conflicting_constraint(), Some(LONG_URL_CONSTRAINT));
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let created = repo
        .insert(new_record("click001", "https://example.com/clicks"))
        .await
        .unwrap();

    repo.increment_clicks("click001").await.unwrap();
    repo.increment_clicks("click001").await.unwrap();

    let record = repo.find_by_code("click001").await.unwrap().unwrap();
    assert_eq!(record.clicks, 2);
    assert!(record.updated_at >= created.updated_at);
}

#[sqlx::test]
async fn test_increment_unknown_code_is_noop(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.increment_clicks("missing1").await.is_ok());
}

#[sqlx::test]
async fn test_health_check(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
