//! Vehicle records held by occupied spots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::Registration;

/// Kind-specific attributes of a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VehicleKind {
    Car {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        colour: Option<String>,
    },
    Truck {
        /// Payload capacity in kilograms
        capacity_kg: u32,
    },
}

impl Default for VehicleKind {
    fn default() -> Self {
        VehicleKind::Car { colour: None }
    }
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car { .. } => "car",
            VehicleKind::Truck { .. } => "truck",
        }
    }
}

/// A vehicle parked (or about to be parked) in a spot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique among currently parked vehicles
    pub registration: Registration,

    pub make: String,

    pub model: String,

    /// Year of manufacture
    pub year: u16,

    #[serde(default)]
    pub kind: VehicleKind,

    /// When the vehicle was parked. Re-stamped each time it occupies a spot.
    pub parked_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create a new vehicle record, stamped with the current time
    pub fn new(
        registration: impl Into<Registration>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
    ) -> Self {
        Self {
            registration: registration.into(),
            make: make.into(),
            model: model.into(),
            year,
            kind: VehicleKind::default(),
            parked_at: Utc::now(),
        }
    }

    pub fn with_kind(mut self, kind: VehicleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Case-insensitive make comparison
    pub fn is_make(&self, make: &str) -> bool {
        self.make.to_lowercase() == make.to_lowercase()
    }

    pub(crate) fn stamp(&mut self, at: DateTime<Utc>) {
        self.parked_at = at;
    }
}
