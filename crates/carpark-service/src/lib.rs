//! Car Park Service
//!
//! JSON API over a single in-memory spot registry. The handlers validate
//! input formats, call the registry, and report occupancy and parking time.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/spots?kind=&vacant=` - List spots with counts
//! - `POST /api/spots` - Add a spot
//! - `GET /api/spots/vacant` - Ids of vacant spots
//! - `GET|DELETE /api/spots/{spot_id}` - Get or delete a spot
//! - `PUT|DELETE /api/spots/{spot_id}/vehicle` - Park in or vacate a spot
//! - `GET /api/vehicles?make=` - List parked vehicles
//! - `GET|DELETE /api/vehicles/{registration}` - Find or remove a vehicle
//! - `GET /api/stats` - Occupancy counts
//! - `POST /api/reset` - Vacate every spot

pub mod config;
pub mod handlers;
pub mod models;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use handlers::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/api/spots",
            get(handlers::list_spots_handler).post(handlers::add_spot_handler),
        )
        .route("/api/spots/vacant", get(handlers::vacant_spots_handler))
        .route(
            "/api/spots/{spot_id}",
            get(handlers::get_spot_handler).delete(handlers::delete_spot_handler),
        )
        .route(
            "/api/spots/{spot_id}/vehicle",
            put(handlers::park_handler).delete(handlers::remove_by_spot_handler),
        )
        .route("/api/vehicles", get(handlers::list_vehicles_handler))
        .route(
            "/api/vehicles/{registration}",
            get(handlers::find_vehicle_handler).delete(handlers::remove_vehicle_handler),
        )
        .route("/api/stats", get(handlers::stats_handler))
        .route("/api/reset", post(handlers::reset_handler))
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
