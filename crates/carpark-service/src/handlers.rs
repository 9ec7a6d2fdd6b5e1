//! API request handlers for the car park

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use carpark_core::validation::{validate_registration, validate_spot_id};
use carpark_core::{SharedRegistry, ValidationError, VehicleDraft, YearRange};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{
    AddSpotRequest, MakeQuery, MessageResponse, RemovedResponse, ResetResponse, SpotResponse,
    SpotView, SpotsListResponse, SpotsQuery, VacantSpotsResponse, VehiclesResponse,
};

/// Shared application state
pub struct AppState {
    pub registry: SharedRegistry,
    pub years: YearRange,
}

impl AppState {
    pub fn new(registry: SharedRegistry, years: YearRange) -> Self {
        Self { registry, years }
    }
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<carpark_core::Error> for ApiError {
    fn from(err: carpark_core::Error) -> Self {
        debug!("Registry rejected request: {}", err);

        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::CONFLICT
        };

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        debug!("Rejected invalid input: {}", err);

        ApiError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "carpark-service"
    }))
}

/// List spots with occupancy and parking time, optionally filtered by kind or vacancy
pub async fn list_spots_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SpotsQuery>,
) -> Json<SpotsListResponse> {
    let (spots, summary) = state.registry.with(|registry| {
        let spots: Vec<_> = registry
            .spots()
            .filter(|spot| query.matches(spot))
            .cloned()
            .collect();
        (spots, registry.summary())
    });

    Json(SpotsListResponse {
        spots: SpotView::from_spots(&spots, Utc::now()),
        summary,
    })
}

/// Add a new vacant spot
pub async fn add_spot_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddSpotRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let spot_id = validate_spot_id(payload.spot_id.trim())?;
    info!("Adding {} spot: {}", payload.kind, spot_id);

    state.registry.add_spot_of_kind(spot_id.clone(), payload.kind)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok(format!("Spot {} added", spot_id))),
    ))
}

/// Ids of every vacant spot, in id order
pub async fn vacant_spots_handler(State(state): State<Arc<AppState>>) -> Json<VacantSpotsResponse> {
    let spot_ids = state.registry.vacant_spots();
    let total = spot_ids.len();

    Json(VacantSpotsResponse { spot_ids, total })
}

/// Get a single spot
pub async fn get_spot_handler(
    State(state): State<Arc<AppState>>,
    Path(spot_id): Path<String>,
) -> Result<Json<SpotResponse>, ApiError> {
    let spot_id = validate_spot_id(&spot_id)?;

    match state.registry.find_spot(spot_id.as_str()) {
        Some(spot) => Ok(Json(SpotResponse {
            spot: SpotView::new(&spot, Utc::now()),
        })),
        None => Err(ApiError::not_found(format!("Spot not found: {}", spot_id))),
    }
}

/// Delete a vacant spot
pub async fn delete_spot_handler(
    State(state): State<Arc<AppState>>,
    Path(spot_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let spot_id = validate_spot_id(&spot_id)?;
    info!("Deleting spot: {}", spot_id);

    state.registry.delete_spot(spot_id.as_str())?;

    Ok(Json(MessageResponse::ok(format!("Spot {} deleted", spot_id))))
}

/// Park a vehicle in a spot
pub async fn park_handler(
    State(state): State<Arc<AppState>>,
    Path(spot_id): Path<String>,
    Json(payload): Json<VehicleDraft>,
) -> Result<Json<SpotResponse>, ApiError> {
    let spot_id = validate_spot_id(&spot_id)?;
    let vehicle = payload.validate(&state.years)?;
    info!("Parking vehicle {} in spot {}", vehicle.registration, spot_id);

    let spot = state.registry.park(spot_id.as_str(), vehicle)?;

    Ok(Json(SpotResponse {
        spot: SpotView::new(&spot, Utc::now()),
    }))
}

/// Vacate a spot by id
pub async fn remove_by_spot_handler(
    State(state): State<Arc<AppState>>,
    Path(spot_id): Path<String>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let spot_id = validate_spot_id(&spot_id)?;
    info!("Removing vehicle from spot: {}", spot_id);

    let vehicle = state.registry.remove_by_spot(spot_id.as_str())?;
    let elapsed_secs = (Utc::now() - vehicle.parked_at).num_seconds();

    Ok(Json(RemovedResponse {
        success: true,
        spot_id,
        vehicle,
        elapsed_secs,
    }))
}

/// Find the spot holding a registration
pub async fn find_vehicle_handler(
    State(state): State<Arc<AppState>>,
    Path(registration): Path<String>,
) -> Result<Json<SpotResponse>, ApiError> {
    let registration = validate_registration(&registration)?;

    match state.registry.find_by_registration(registration.as_str()) {
        Some(spot) => Ok(Json(SpotResponse {
            spot: SpotView::new(&spot, Utc::now()),
        })),
        None => Err(ApiError::not_found(format!(
            "Vehicle not found: {}",
            registration
        ))),
    }
}

/// Remove a vehicle wherever it is parked
pub async fn remove_vehicle_handler(
    State(state): State<Arc<AppState>>,
    Path(registration): Path<String>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let registration = validate_registration(&registration)?;
    info!("Removing vehicle: {}", registration);

    let (spot_id, vehicle) = state
        .registry
        .remove_by_registration(registration.as_str())?;
    let elapsed_secs = (Utc::now() - vehicle.parked_at).num_seconds();

    Ok(Json(RemovedResponse {
        success: true,
        spot_id,
        vehicle,
        elapsed_secs,
    }))
}

/// List parked vehicles, optionally filtered by make
pub async fn list_vehicles_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MakeQuery>,
) -> Json<VehiclesResponse> {
    let spots = match query.make.as_deref().map(str::trim) {
        Some(make) if !make.is_empty() => state.registry.find_by_make(make),
        _ => state
            .registry
            .spots()
            .into_iter()
            .filter(|spot| spot.is_occupied())
            .collect(),
    };

    let spots = SpotView::from_spots(&spots, Utc::now());
    let total = spots.len();

    Json(VehiclesResponse { spots, total })
}

/// Occupancy counts
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.registry.summary())
}

/// Vacate every spot
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ResetResponse> {
    info!("Resetting car park");

    let removed = state.registry.reset_all();

    Json(ResetResponse {
        success: true,
        removed,
    })
}
