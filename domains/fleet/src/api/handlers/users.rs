//! User resource handlers
//!
//! Implements the user CRUD surface:
//! - GET /users - full or filtered listing, cars eagerly attached
//! - POST /users - registration (password hashed at rest)
//! - GET /users/{id} - single user
//! - PUT/PATCH /users/{id} - partial update under the `payload` key
//! - DELETE /users/{id} - remove user and, by cascade, their cars

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use garage_common::{missing_fields, pick, Failure, PageBounds, Result};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::api::handlers::{authorization_filter, parse_id};
use crate::api::middleware::FleetState;
use crate::domain::entities::{NewUser, UserPatch, UserWithCars, USER_FIELDS};

/// Request body for creating a user
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 140))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

/// Partial-update fields accepted under the `payload` key
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, max = 140))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 72))]
    pub password: Option<String>,
}

fn user_not_found(id: i64) -> Failure {
    Failure::not_found(format!("cannot find user with id {id}"))
}

/// List users, or a single user when the `authorization` header filters by id
///
/// **GET /users**
pub async fn index(
    State(state): State<FleetState>,
    bounds: PageBounds,
    headers: HeaderMap,
) -> Result<Response> {
    match authorization_filter(&headers)? {
        Some(id) => {
            let user = state
                .users
                .find_by_id(id)
                .await?
                .ok_or_else(|| user_not_found(id))?;
            let cars = state.cars.find_by_user(user.id).await?;
            Ok(Json(UserWithCars { user, cars }).into_response())
        }
        None => {
            let users = state.users.page_with_cars(bounds).await?;
            Ok(Json(users).into_response())
        }
    }
}

/// Register a new user
///
/// **POST /users**
///
/// The submission is restricted to the allowed field set; absent fields are
/// reported through the envelope before any typed validation runs.
pub async fn store(
    State(state): State<FleetState>,
    Json(body): Json<Value>,
) -> Result<Response> {
    let submitted = body.as_object();
    if let Some(missing) = missing_fields(submitted, &USER_FIELDS) {
        if !missing.is_empty() {
            return Err(Failure::validation("missing required fields")
                .with_fields(missing)
                .with_payload(body.clone()));
        }
    }

    let allowed = submitted
        .map(|map| pick(map, &USER_FIELDS))
        .unwrap_or_default();
    let request: CreateUserRequest = serde_json::from_value(Value::Object(allowed))
        .map_err(|e| Failure::validation(e.to_string()).with_payload(body.clone()))?;
    request
        .validate()
        .map_err(|e| Failure::validation(format!("validation failed: {e}")).with_payload(body.clone()))?;

    let user = state
        .users
        .create(NewUser {
            name: request.name,
            email: request.email,
            password_hash: state.hasher.hash(&request.password),
        })
        .await?;

    Ok(Json(user).into_response())
}

/// Display a single user
///
/// **GET /users/{id}**
pub async fn show(
    State(state): State<FleetState>,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(user).into_response())
}

/// Update user details
///
/// **PUT or PATCH /users/{id}**
///
/// The submission must carry the partial fields under a nested `payload`
/// key; on failure the envelope reports which allowed fields the payload
/// lacked and echoes the payload back.
pub async fn update(
    State(state): State<FleetState>,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;

    let Some(payload) = body
        .as_object()
        .and_then(|map| map.get("payload"))
        .cloned()
    else {
        return Err(Failure::validation("payload is required"));
    };

    let inner = payload.as_object();
    let diffed = missing_fields(inner, &USER_FIELDS).unwrap_or_default();
    let decorate = |failure: Failure| {
        failure
            .with_fields(diffed.clone())
            .with_payload(payload.clone())
    };

    let allowed = inner.map(|map| pick(map, &USER_FIELDS)).unwrap_or_default();
    let request: UpdateUserPayload = serde_json::from_value(Value::Object(allowed))
        .map_err(|e| decorate(Failure::validation(e.to_string())))?;
    request
        .validate()
        .map_err(|e| decorate(Failure::validation(format!("validation failed: {e}"))))?;

    let patch = UserPatch {
        name: request.name,
        email: request.email,
        password_hash: request.password.map(|password| state.hasher.hash(&password)),
    };

    let user = state
        .users
        .update(id, patch)
        .await
        .map_err(|e| decorate(Failure::from(e)))?;

    Ok(Json(user).into_response())
}

/// Delete a user with id
///
/// **DELETE /users/{id}**
pub async fn destroy(
    State(state): State<FleetState>,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;
    if state.users.find_by_id(id).await?.is_none() {
        return Err(user_not_found(id));
    }
    state.users.delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
