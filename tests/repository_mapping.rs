mod common;

use snaplink::domain::entities::NewUrlMapping;
use snaplink::domain::repositories::MappingRepository;
use snaplink::error::AppError;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

fn new_mapping(code: &str, url: &str) -> NewUrlMapping {
    NewUrlMapping {
        original_url: url.to_string(),
        short_code: code.to_string(),
    }
}

#[sqlx::test]
async fn test_insert_and_find_by_short_code(pool: PgPool) {
    let repo = common::create_test_repository(pool);

    let created = repo
        .insert(new_mapping("Ab3dE9", "https://example.com/a"))
        .await
        .unwrap();

    assert_eq!(created.short_code, "Ab3dE9");
    assert_eq!(created.original_url, "https://example.com/a");
    assert_eq!(created.click_count, 0);

    let found = repo.find_by_short_code("Ab3dE9").await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[sqlx::test]
async fn test_find_by_short_code_is_case_sensitive(pool: PgPool) {
    common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/a").await;
    let repo = common::create_test_repository(pool);

    assert!(repo.find_by_short_code("ab3de9").await.unwrap().is_none());
    assert!(repo.find_by_short_code("AB3DE9").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_short_code_missing(pool: PgPool) {
    let repo = common::create_test_repository(pool);

    assert!(repo.find_by_short_code("NOPE00").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_original_url_exact_match(pool: PgPool) {
    common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/a").await;
    let repo = common::create_test_repository(pool);

    let found = repo
        .find_by_original_url("https://example.com/a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.short_code, "Ab3dE9");

    assert!(
        repo.find_by_original_url("https://example.com/a/")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repo.find_by_original_url("http://example.com/a")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
async fn test_find_by_original_url_returns_oldest_duplicate(pool: PgPool) {
    common::create_test_mapping(&pool, "First1", "https://example.com/dup").await;
    common::create_test_mapping(&pool, "Second", "https://example.com/dup").await;
    sqlx::query(
        "UPDATE url_mappings SET created_at = created_at + INTERVAL '1 second' WHERE short_code = 'Second'",
    )
    .execute(&pool)
    .await
    .unwrap();
    let repo = common::create_test_repository(pool);

    let found = repo
        .find_by_original_url("https://example.com/dup")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.short_code, "First1");
}

#[sqlx::test]
async fn test_insert_duplicate_code_is_collision(pool: PgPool) {
    common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/a").await;
    let repo = common::create_test_repository(pool.clone());

    let result = repo
        .insert(new_mapping("Ab3dE9", "https://example.com/b"))
        .await;

    match result {
        Err(AppError::CodeCollision { code }) => assert_eq!(code, "Ab3dE9"),
        other => panic!("expected CodeCollision, got {other:?}"),
    }
    assert_eq!(common::mapping_count(&pool).await, 1);
}

#[sqlx::test]
async fn test_increment_click_count(pool: PgPool) {
    let id = common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/a").await;
    let repo = common::create_test_repository(pool.clone());

    assert!(repo.increment_click_count(id).await.unwrap());
    assert!(repo.increment_click_count(id).await.unwrap());

    assert_eq!(common::click_count(&pool, "Ab3dE9").await, 2);
}

#[sqlx::test]
async fn test_increment_click_count_unknown_id(pool: PgPool) {
    let repo = common::create_test_repository(pool);

    assert!(!repo.increment_click_count(Uuid::new_v4()).await.unwrap());
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let id = common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/a").await;
    let repo = common::create_test_repository(pool.clone());

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.increment_click_count(id).await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(common::click_count(&pool, "Ab3dE9").await, 50);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = common::create_test_repository(pool);

    assert!(repo.ping().await.is_ok());
}
