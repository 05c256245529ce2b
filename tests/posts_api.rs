use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use posts_api::{
    app::build_router,
    middleware::http::HttpLimits,
    repos::{MemoryDb, user_repo},
    services::auth::{AuthService, ExtractionPolicy, Secret},
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "posts-secret";

struct TestApp {
    router: Router,
    auth: Arc<AuthService>,
}

/// Router over a fresh store with alice (id 1) and bob (id 2) registered.
async fn test_app() -> TestApp {
    let auth = Arc::new(AuthService::new(
        &Secret::new(SECRET).unwrap(),
        ExtractionPolicy::default(),
    ));
    let db = Arc::new(MemoryDb::new());
    user_repo::create(&db, "alice@example.com", "alice-pw").await.unwrap();
    user_repo::create(&db, "bob@example.com", "bob-pw").await.unwrap();

    TestApp {
        router: build_router(AppState::new(auth.clone(), db), HttpLimits::default()),
        auth,
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &TestApp, email: &str, password: &str) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({"email": email, "password": password}),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn login_token_creates_a_post() {
    let app = test_app().await;

    let res = login(&app, "alice@example.com", "alice-pw").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(app.auth.extract_subject_id(&token), Ok(1));

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/posts?token=1",
            Some(&token),
            json!({"title": "  Hello <world>  ", "content": "first & only", "author_id": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()[header::LOCATION], "/api/v1/posts/1");
    let post = json_body(res).await;
    assert_eq!(post["id"], 1);
    assert_eq!(post["title"], "Hello &lt;world&gt;");
    assert_eq!(post["content"], "first &amp; only");
    assert_eq!(post["author_id"], 1);

    let res = app.router.clone().oneshot(get("/api/v1/posts/1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["title"], "Hello &lt;world&gt;");

    let res = app.router.clone().oneshot(get("/api/v1/posts")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn author_other_than_token_subject_is_unauthorized() {
    let app = test_app().await;
    let bob = app.auth.create_token(2).unwrap();

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/posts?token=1",
            Some(&bob),
            json!({"title": "t", "content": "c", "author_id": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["error"]["code"], "UNAUTHORIZED");

    let res = app.router.clone().oneshot(get("/api/v1/posts")).await.unwrap();
    assert_eq!(json_body(res).await, json!([]));
}

#[tokio::test]
async fn create_without_token_is_unauthorized() {
    let app = test_app().await;

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/posts?token=1",
            None,
            json!({"title": "t", "content": "c", "author_id": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blank_title_is_unprocessable() {
    let app = test_app().await;
    let token = app.auth.create_token(1).unwrap();

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/posts?token=1",
            Some(&token),
            json!({"title": "   ", "content": "c", "author_id": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(res).await["error"]["message"], "title is required");
}

#[tokio::test]
async fn duplicate_title_is_a_conflict() {
    let app = test_app().await;
    let token = app.auth.create_token(1).unwrap();
    let create = || {
        json_request(
            Method::POST,
            "/api/v1/posts?token=1",
            Some(&token),
            json!({"title": "same", "content": "c", "author_id": 1}),
        )
    };

    let res = app.router.clone().oneshot(create()).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.router.clone().oneshot(create()).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_unauthorized() {
    let app = test_app().await;

    let res = login(&app, "alice@example.com", "bob-pw").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = login(&app, "carol@example.com", "alice-pw").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_or_invalid_post_id() {
    let app = test_app().await;

    let res = app.router.clone().oneshot(get("/api/v1/posts/99")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["error"]["message"], "post not found.");

    let res = app.router.clone().oneshot(get("/api/v1/posts/abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["error"]["code"], "invalid_post_id");
}
