//! Car resource handlers
//!
//! Implements the car CRUD surface:
//! - GET /cars - full listing with owners attached, or one owner's cars
//!   when the `authorization` header filters by user id
//! - POST /cars - create
//! - GET /cars/{id} - single car
//! - PUT/PATCH /cars/{id} - partial update under the `payload` key
//! - DELETE /cars/{id} - remove car

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
use crate::domain::entities::{CarPatch, NewCar, CAR_FIELDS};

/// Request body for creating a car
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 140))]
    pub name: String,

    #[validate(length(min = 1, max = 40))]
    pub color: String,

    #[validate(length(min = 1, max = 60))]
    pub brand: String,

    #[validate(length(equal = 4))]
    pub year: String,

    #[validate(length(min = 1, max = 20))]
    pub plate: String,

    pub user_id: i64,
}

/// Partial-update fields accepted under the `payload` key
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarPayload {
    #[validate(length(min = 1, max = 140))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 40))]
    pub color: Option<String>,

    #[validate(length(min = 1, max = 60))]
    pub brand: Option<String>,

    #[validate(length(equal = 4))]
    pub year: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub plate: Option<String>,

    pub user_id: Option<i64>,
}

fn car_not_found(id: i64) -> Failure {
    Failure::not_found(format!("cannot find car with id {id}"))
}

/// List cars with owners attached, or one owner's cars
///
/// **GET /cars**
pub async fn index(
    State(state): State<FleetState>,
    bounds: PageBounds,
    headers: HeaderMap,
) -> Result<Response> {
    match authorization_filter(&headers)? {
        Some(user_id) => {
            let cars = state.cars.find_by_user(user_id).await?;
            Ok(Json(cars).into_response())
        }
        None => {
            let cars = state.cars.page_with_user(bounds).await?;
            Ok(Json(cars).into_response())
        }
    }
}

/// Create a new car
///
/// **POST /cars**
pub async fn store(
    State(state): State<FleetState>,
    Json(body): Json<Value>,
) -> Result<Response> {
    let submitted = body.as_object();
    if let Some(missing) = missing_fields(submitted, &CAR_FIELDS) {
        if !missing.is_empty() {
            return Err(Failure::validation("missing required fields")
                .with_fields(missing)
                .with_payload(body.clone()));
        }
    }

    let allowed = submitted
        .map(|map| pick(map, &CAR_FIELDS))
        .unwrap_or_default();
    let request: CreateCarRequest = serde_json::from_value(Value::Object(allowed))
        .map_err(|e| Failure::validation(e.to_string()).with_payload(body.clone()))?;
    request
        .validate()
        .map_err(|e| Failure::validation(format!("validation failed: {e}")).with_payload(body.clone()))?;

    let car = state
        .cars
        .create(NewCar {
            name: request.name,
            color: request.color,
            brand: request.brand,
            year: request.year,
            plate: request.plate,
            user_id: request.user_id,
        })
        .await?;

    Ok(Json(car).into_response())
}

/// Display a single car
///
/// **GET /cars/{id}**
pub async fn show(
    State(state): State<FleetState>,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;
    let car = state
        .cars
        .find_by_id(id)
        .await?
        .ok_or_else(|| car_not_found(id))?;

    Ok(Json(car).into_response())
}

/// Update car details
///
/// **PUT or PATCH /cars/{id}**
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
    let diffed = missing_fields(inner, &CAR_FIELDS).unwrap_or_default();
    let decorate = |failure: Failure| {
        failure
            .with_fields(diffed.clone())
            .with_payload(payload.clone())
    };

    let allowed = inner.map(|map| pick(map, &CAR_FIELDS)).unwrap_or_default();
    let request: UpdateCarPayload = serde_json::from_value(Value::Object(allowed))
        .map_err(|e| decorate(Failure::validation(e.to_string())))?;
    request
        .validate()
        .map_err(|e| decorate(Failure::validation(format!("validation failed: {e}"))))?;

    let patch = CarPatch {
        name: request.name,
        color: request.color,
        brand: request.brand,
        year: request.year,
        plate: request.plate,
        user_id: request.user_id,
    };

    let car = state
        .cars
        .update(id, patch)
        .await
        .map_err(|e| decorate(Failure::from(e)))?;

    Ok(Json(car).into_response())
}

/// Delete a car with id
///
/// **DELETE /cars/{id}**
pub async fn destroy(
    State(state): State<FleetState>,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&raw_id)?;
    if state.cars.find_by_id(id).await?.is_none() {
        return Err(car_not_found(id));
    }
    state.cars.delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
