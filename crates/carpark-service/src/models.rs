//! Request and response bodies for the car park API

use carpark_core::{OccupancySummary, Spot, SpotId, SpotKind, Vehicle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One spot as reported to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotView {
    pub spot_id: SpotId,

    pub kind: SpotKind,

    pub occupied: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parked_at: Option<DateTime<Utc>>,

    /// Seconds since the vehicle was parked, as of the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<i64>,
}

impl SpotView {
    pub fn new(spot: &Spot, now: DateTime<Utc>) -> Self {
        Self {
            spot_id: spot.id().clone(),
            kind: spot.kind(),
            occupied: spot.is_occupied(),
            vehicle: spot.occupant().cloned(),
            parked_at: spot.parked_at(),
            elapsed_secs: spot.elapsed(now).map(|d| d.num_seconds()),
        }
    }

    pub fn from_spots(spots: &[Spot], now: DateTime<Utc>) -> Vec<Self> {
        spots.iter().map(|spot| Self::new(spot, now)).collect()
    }
}

/// Request to add a spot
#[derive(Debug, Deserialize)]
pub struct AddSpotRequest {
    pub spot_id: String,

    #[serde(default)]
    pub kind: SpotKind,
}

/// Generic outcome of a mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpotResponse {
    pub spot: SpotView,
}

/// Full listing plus counts
#[derive(Debug, Serialize)]
pub struct SpotsListResponse {
    pub spots: Vec<SpotView>,
    pub summary: OccupancySummary,
}

/// Ids of every vacant spot
#[derive(Debug, Serialize)]
pub struct VacantSpotsResponse {
    pub spot_ids: Vec<SpotId>,
    pub total: usize,
}

/// Spots matched by a vehicle query
#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub spots: Vec<SpotView>,
    pub total: usize,
}

/// Result of vacating a spot
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub success: bool,
    pub spot_id: SpotId,
    pub vehicle: Vehicle,
    pub elapsed_secs: i64,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub removed: usize,
}

#[derive(Debug, Deserialize)]
pub struct MakeQuery {
    pub make: Option<String>,
}

/// Optional filters for the spot listing
#[derive(Debug, Default, Deserialize)]
pub struct SpotsQuery {
    pub kind: Option<SpotKind>,
    pub vacant: Option<bool>,
}

impl SpotsQuery {
    pub fn matches(&self, spot: &Spot) -> bool {
        self.kind.map_or(true, |kind| spot.kind() == kind)
            && self.vacant.map_or(true, |vacant| spot.is_occupied() != vacant)
    }
}
