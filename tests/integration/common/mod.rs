//! Shared fixtures and request helpers for the API tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use garage_app::app_with_state;
use garage_common::{PasswordHasher, SaltedSha256};
use garage_fleet::{Car, CarStore, FleetState, MemoryStore, NewCar, NewUser, User, UserStore};

/// A router wired to fresh in-memory stores, plus seeding helpers
pub struct TestApp {
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    pub fn router(&self) -> Router {
        app_with_state(FleetState {
            users: Arc::new(self.store.clone()),
            cars: Arc::new(self.store.clone()),
            hasher: Arc::new(SaltedSha256),
        })
    }

    pub async fn seed_user(&self, name: &str, email: &str, password: &str) -> User {
        UserStore::create(
            &self.store,
            NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: SaltedSha256.hash(password),
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_car(&self, plate: &str, user_id: i64) -> Car {
        CarStore::create(
            &self.store,
            NewCar {
                name: "Kadett".to_string(),
                color: "silver".to_string(),
                brand: "Chevrolet".to_string(),
                year: "1996".to_string(),
                plate: plate.to_string(),
                user_id,
            },
        )
        .await
        .unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request and decode the JSON response body.
///
/// An empty body (204 responses) decodes to `Value::Null`.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Send a request and return the raw response body as text
pub async fn send_raw(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
