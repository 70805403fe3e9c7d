#![allow(dead_code)]

use snaplink::application::services::{RedirectService, ShortenerService};
use snaplink::domain::click_event::ClickEvent;
use snaplink::infrastructure::persistence::PgMappingRepository;
use snaplink::state::AppState;
use snaplink::utils::code_generator::RandomCodeGenerator;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

pub const BASE_URL: &str = "http://sho.rt";

pub async fn create_test_mapping(pool: &PgPool, code: &str, url: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO url_mappings (id, original_url, short_code) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn set_click_count(pool: &PgPool, code: &str, count: i64) {
    sqlx::query("UPDATE url_mappings SET click_count = $1 WHERE short_code = $2")
        .bind(count)
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM url_mappings WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn mapping_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_repository(pool: PgPool) -> Arc<PgMappingRepository> {
    Arc::new(PgMappingRepository::new(Arc::new(pool)))
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let repository = create_test_repository(pool);

    let shortener_service = Arc::new(ShortenerService::new(
        repository.clone(),
        RandomCodeGenerator::new(),
    ));
    let redirect_service = Arc::new(RedirectService::new(repository, tx));

    let state = AppState::new(shortener_service, redirect_service, BASE_URL);

    (state, rx)
}
