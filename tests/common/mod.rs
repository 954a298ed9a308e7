// Allow dead code: each test binary uses a different subset of the mock
#![allow(dead_code)]

//! Shared mock Streamz backend for integration tests.
//!
//! Serves the auth and catalog endpoints the client consumes, on an
//! ephemeral port. Token handling mirrors the real backend: `Authorization:
//! Token <token>` headers, DRF-style error bodies, paginated list responses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub const VALID_TOKEN: &str = "test-token-123";
pub const REGISTER_TOKEN: &str = "register-token-456";

#[derive(Clone)]
pub struct MockState {
    pub profile_hits: Arc<AtomicUsize>,
}

pub struct MockBackend {
    pub base_url: String,
    pub state: MockState,
}

impl MockBackend {
    pub fn profile_hits(&self) -> usize {
        self.state.profile_hits.load(Ordering::SeqCst)
    }
}

/// Start the mock backend on 127.0.0.1:0 and return its API base URL
pub async fn spawn_backend() -> MockBackend {
    let state = MockState {
        profile_hits: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/api/auth/login/", post(login))
        .route("/api/auth/register/", post(register))
        .route("/api/auth/profile/", get(profile))
        .route("/api/auth/plans/", get(plans))
        .route("/api/content/content/", get(content_list))
        .route("/api/content/content/movies/", get(movies))
        .route(
            "/api/streaming/history/continue_watching/",
            get(continue_watching),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Token ")
}

fn authorized(headers: &HeaderMap) -> bool {
    matches!(bearer_token(headers), Some(VALID_TOKEN) | Some(REGISTER_TOKEN))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Invalid token."})),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "testuser" && body["password"] == "password123" {
        (
            StatusCode::OK,
            Json(json!({
                "token": VALID_TOKEN,
                "user": {"id": 1, "username": "testuser"}
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "non_field_errors": ["Unable to log in with provided credentials."]
            })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] != body["password2"] {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"password": ["Password fields didn't match."]})),
        );
    }
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["A user with that username already exists."]})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "token": REGISTER_TOKEN,
            "user": {
                "id": 2,
                "username": body["username"],
                "email": body["email"],
                "plan": body["plan"],
                "subscription_active": true
            }
        })),
    )
}

async fn profile(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.profile_hits.fetch_add(1, Ordering::SeqCst);
    match bearer_token(&headers) {
        Some(VALID_TOKEN) => (
            StatusCode::OK,
            Json(json!({"id": 1, "username": "testuser"})),
        ),
        Some(REGISTER_TOKEN) => (
            StatusCode::OK,
            Json(json!({
                "id": 2,
                "username": "newuser",
                "email": "new@example.com",
                "subscription_active": true
            })),
        ),
        _ => unauthorized(),
    }
}

async fn plans() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Basic", "price": "7.99", "max_screens": 1, "video_quality": "SD"},
        {"id": 2, "name": "Premium", "price": "15.99", "max_screens": 4, "video_quality": "4K"}
    ]))
}

fn all_movies() -> Vec<Value> {
    vec![
        json!({"id": 1, "title": "The Abyss", "content_type": "movie", "release_year": 2020}),
        json!({"id": 2, "title": "Night Train", "content_type": "movie", "release_year": 2021}),
    ]
}

async fn movies(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let results: Vec<Value> = all_movies()
        .into_iter()
        .filter(|m| match params.get("release_year") {
            Some(year) => m["release_year"].to_string() == *year,
            None => true,
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "count": results.len(),
            "next": null,
            "previous": null,
            "results": results
        })),
    )
}

async fn content_list(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let catalog = vec![
        json!({"id": 1, "title": "The Abyss", "content_type": "movie"}),
        json!({"id": 3, "title": "Deep Blue", "content_type": "documentary"}),
        json!({"id": 4, "title": "Harbor Lights", "content_type": "series"}),
    ];
    let results: Vec<Value> = match params.get("search") {
        Some(q) => {
            let q = q.to_lowercase();
            catalog
                .into_iter()
                .filter(|c| c["title"].as_str().unwrap().to_lowercase().contains(&q))
                .collect()
        }
        None => catalog,
    };
    (
        StatusCode::OK,
        Json(json!({
            "count": results.len(),
            "next": null,
            "previous": null,
            "results": results
        })),
    )
}

// Returned as a bare array: the endpoint bypasses pagination in the backend
async fn continue_watching(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!([
            {
                "id": 10,
                "content": {"id": 1, "title": "The Abyss", "content_type": "movie"},
                "progress_seconds": 1200,
                "completed": false,
                "progress_percentage": 40.0
            }
        ])),
    )
}
