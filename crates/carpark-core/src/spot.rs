//! A single parking spot and its Vacant/Occupied state machine

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::id::SpotId;
use crate::vehicle::Vehicle;

/// Category of a parking spot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotKind {
    #[default]
    Compact,
    Large,
    Handicapped,
}

impl SpotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotKind::Compact => "compact",
            SpotKind::Large => "large",
            SpotKind::Handicapped => "handicapped",
        }
    }
}

impl fmt::Display for SpotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpotKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(SpotKind::Compact),
            "large" => Ok(SpotKind::Large),
            "handicapped" => Ok(SpotKind::Handicapped),
            _ => Err(s.to_string()),
        }
    }
}

/// An addressable parking location.
///
/// Occupancy is derived from `occupant`, so a spot can never be flagged
/// occupied without a vehicle, nor hold a vehicle without a parked-at time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spot {
    id: SpotId,
    kind: SpotKind,
    occupant: Option<Vehicle>,
}

impl Spot {
    /// Create a vacant compact spot
    pub fn new(id: impl Into<SpotId>) -> Self {
        Self::with_kind(id, SpotKind::default())
    }

    /// Create a vacant spot of the given kind
    pub fn with_kind(id: impl Into<SpotId>, kind: SpotKind) -> Self {
        Self {
            id: id.into(),
            kind,
            occupant: None,
        }
    }

    pub fn id(&self) -> &SpotId {
        &self.id
    }

    pub fn kind(&self) -> SpotKind {
        self.kind
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    pub fn parked_at(&self) -> Option<DateTime<Utc>> {
        self.occupant.as_ref().map(|v| v.parked_at)
    }

    /// Time the current occupant has been parked, measured against `now`
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.parked_at().map(|at| now - at)
    }

    /// Park `vehicle` here, stamping the current time
    pub fn occupy(&mut self, vehicle: Vehicle) -> Result<()> {
        self.occupy_at(vehicle, Utc::now())
    }

    /// Park `vehicle` here with an explicit parked-at time
    pub fn occupy_at(&mut self, mut vehicle: Vehicle, at: DateTime<Utc>) -> Result<()> {
        if self.is_occupied() {
            return Err(Error::AlreadyOccupied(self.id.clone()));
        }
        vehicle.stamp(at);
        self.occupant = Some(vehicle);
        Ok(())
    }

    /// Clear the spot, handing back the vehicle that was in it
    pub fn vacate(&mut self) -> Result<Vehicle> {
        self.occupant
            .take()
            .ok_or_else(|| Error::AlreadyVacant(self.id.clone()))
    }
}
