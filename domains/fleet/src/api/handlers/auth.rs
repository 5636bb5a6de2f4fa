//! Authentication handler
//!
//! Implements:
//! - POST /login - password check against the stored hash
//!
//! Every login outcome answers HTTP 200; the body carries the truth
//! (`error`, `fields`, and the user with their cars on success).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use garage_common::{missing_fields, Failure, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::middleware::FleetState;
use crate::domain::entities::UserWithCars;

/// Expected login credential fields
pub const LOGIN_FIELDS: [&str; 2] = ["email", "password"];

/// Response body for every login outcome
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub error: bool,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserWithCars>,
}

/// Field list for the lookup-failure branch: expected credential fields
/// absent from the submission, with `email` always appended.
fn lookup_failure_fields(submitted: Option<&Map<String, Value>>) -> Vec<String> {
    let mut fields = missing_fields(submitted, &LOGIN_FIELDS).unwrap_or_default();
    fields.push("email".to_string());
    fields
}

/// Check login credentials
///
/// **POST /login**
pub async fn login(State(state): State<FleetState>, Json(body): Json<Value>) -> Result<Response> {
    let submitted = body.as_object();
    let email = submitted
        .and_then(|map| map.get("email"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let password = submitted
        .and_then(|map| map.get("password"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    tracing::debug!(email, "login attempt");

    let user = state
        .users
        .find_by_email(email)
        .await
        .map_err(|e| {
            Failure::from(e)
                .with_fields(lookup_failure_fields(submitted))
                .with_status(StatusCode::OK)
        })?
        .ok_or_else(|| {
            Failure::not_found(format!("cannot find user with email `{email}`"))
                .with_fields(lookup_failure_fields(submitted))
                .with_status(StatusCode::OK)
        })?;

    if !state.hasher.verify(password, &user.password_hash) {
        return Ok(Json(LoginResponse {
            error: true,
            fields: vec!["password".to_string()],
            user: None,
        })
        .into_response());
    }

    let cars = state.cars.find_by_user(user.id).await.map_err(|e| {
        Failure::from(e)
            .with_fields(lookup_failure_fields(submitted))
            .with_status(StatusCode::OK)
    })?;

    Ok(Json(LoginResponse {
        error: false,
        fields: Vec::new(),
        user: Some(UserWithCars { user, cars }),
    })
    .into_response())
}
