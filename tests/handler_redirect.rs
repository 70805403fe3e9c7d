mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use snaplink::api::handlers::redirect_handler;
use snaplink::domain::click_event::ClickEvent;
use sqlx::PgPool;

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    let id = common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/target").await;
    let (state, mut rx) = common::create_test_state(pool);
    let app = Router::new()
        .route("/{short_code}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/Ab3dE9").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");

    let event = rx.try_recv().unwrap();
    assert_eq!(event, ClickEvent::new(id, "Ab3dE9"));
}

#[sqlx::test]
async fn test_redirect_keeps_query_and_fragment(pool: PgPool) {
    common::create_test_mapping(&pool, "Qs1234", "https://example.com/a?b=1&c=2#frag").await;
    let (state, _rx) = common::create_test_state(pool);
    let app = Router::new()
        .route("/{short_code}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/Qs1234").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://example.com/a?b=1&c=2#frag"
    );
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool);
    let app = Router::new()
        .route("/{short_code}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/NOPE00").await;

    assert_eq!(response.status_code(), 404);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["message"], "Short URL not found");
    assert!(rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_redirect_queues_one_event_per_hit(pool: PgPool) {
    common::create_test_mapping(&pool, "Ab3dE9", "https://example.com/target").await;
    let (state, mut rx) = common::create_test_state(pool);
    let app = Router::new()
        .route("/{short_code}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    for _ in 0..3 {
        assert_eq!(server.get("/Ab3dE9").await.status_code(), 301);
    }

    let mut events = 0;
    while rx.try_recv().is_ok() {
        events += 1;
    }
    assert_eq!(events, 3);
}

#[sqlx::test]
async fn test_redirect_percent_encodes_location(pool: PgPool) {
    common::create_test_mapping(&pool, "Utf8Ab", "https://example.com/ä?q=ü").await;
    let (state, mut rx) = common::create_test_state(pool.clone());
    let app = Router::new()
        .route("/{short_code}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/Utf8Ab").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://example.com/%C3%A4?q=%C3%BC"
    );
    assert!(rx.try_recv().is_ok());

    let stored: String =
        sqlx::query_scalar("SELECT original_url FROM url_mappings WHERE short_code = 'Utf8Ab'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored, "https://example.com/ä?q=ü");
}
