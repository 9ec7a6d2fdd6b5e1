//! The authoritative collection of parking spots
//!
//! Data model:
//! - spots: spot id → Spot, kept in id order for deterministic listing
//! - parked: registration → spot id, one entry per occupied spot
//!
//! `parked` is a reverse index over the occupants in `spots`. Every mutation
//! checks all preconditions before touching either map, so a failed call
//! never leaves them out of step.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::id::{Registration, SpotId};
use crate::spot::{Spot, SpotKind};
use crate::vehicle::Vehicle;

/// Spot counts at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancySummary {
    pub total: usize,
    pub occupied: usize,
    pub vacant: usize,
}

/// In-memory registry of spots and the vehicles parked in them
#[derive(Debug, Default, Clone)]
pub struct Registry {
    spots: BTreeMap<SpotId, Spot>,
    parked: HashMap<Registration, SpotId>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-seeded with vacant spots
    pub fn with_spots<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<SpotId>,
    {
        let mut registry = Self::new();
        for id in ids {
            registry.add_spot(id)?;
        }
        Ok(registry)
    }

    /// Add a new vacant compact spot
    pub fn add_spot(&mut self, id: impl Into<SpotId>) -> Result<()> {
        self.add_spot_of_kind(id, SpotKind::default())
    }

    /// Add a new vacant spot of the given kind
    pub fn add_spot_of_kind(&mut self, id: impl Into<SpotId>, kind: SpotKind) -> Result<()> {
        let id = id.into();
        if self.spots.contains_key(&id) {
            debug!("Spot already exists: {}", id);
            return Err(Error::DuplicateSpot(id));
        }

        self.spots.insert(id.clone(), Spot::with_kind(id.clone(), kind));
        info!("Added {} spot: {}", kind, id);
        Ok(())
    }

    /// Remove a spot. Only vacant spots can be deleted.
    pub fn delete_spot(&mut self, id: &str) -> Result<Spot> {
        let spot = self
            .spots
            .get(id)
            .ok_or_else(|| Error::SpotNotFound(SpotId::from(id)))?;

        if spot.is_occupied() {
            debug!("Cannot delete occupied spot: {}", id);
            return Err(Error::SpotOccupied(spot.id().clone()));
        }

        let spot = self
            .spots
            .remove(id)
            .ok_or_else(|| Error::SpotNotFound(SpotId::from(id)))?;
        info!("Deleted spot: {}", id);
        Ok(spot)
    }

    pub fn find_spot(&self, id: &str) -> Option<&Spot> {
        self.spots.get(id)
    }

    /// Whether a vehicle with this registration is parked anywhere
    pub fn is_vehicle_present(&self, registration: &str) -> bool {
        self.parked.contains_key(registration)
    }

    /// Park a vehicle, stamping the current time
    pub fn park(&mut self, spot_id: &str, vehicle: Vehicle) -> Result<()> {
        self.park_at(spot_id, vehicle, Utc::now())
    }

    /// Park a vehicle with an explicit parked-at time.
    ///
    /// The registration is checked against every spot before the target spot
    /// is looked at, so a vehicle that is already parked is rejected even
    /// when the destination is free.
    pub fn park_at(&mut self, spot_id: &str, vehicle: Vehicle, at: DateTime<Utc>) -> Result<()> {
        if self.is_vehicle_present(vehicle.registration.as_str()) {
            debug!(
                "Vehicle {} already parked, rejecting spot {}",
                vehicle.registration, spot_id
            );
            return Err(Error::VehicleAlreadyParked(vehicle.registration));
        }

        let spot = self
            .spots
            .get_mut(spot_id)
            .ok_or_else(|| Error::SpotNotFound(SpotId::from(spot_id)))?;

        if spot.is_occupied() {
            debug!("Spot {} occupied, rejecting {}", spot_id, vehicle.registration);
            return Err(Error::SpotOccupied(spot.id().clone()));
        }

        let registration = vehicle.registration.clone();
        spot.occupy_at(vehicle, at)?;
        self.parked.insert(registration.clone(), spot.id().clone());

        info!("Parked vehicle {} in spot {}", registration, spot_id);
        Ok(())
    }

    /// Vacate a spot by id, returning the vehicle that was in it
    pub fn remove_by_spot(&mut self, spot_id: &str) -> Result<Vehicle> {
        let spot = self
            .spots
            .get_mut(spot_id)
            .ok_or_else(|| Error::SpotNotFound(SpotId::from(spot_id)))?;

        let vehicle = spot.vacate()?;
        self.parked.remove(&vehicle.registration);

        info!("Removed vehicle {} from spot {}", vehicle.registration, spot_id);
        Ok(vehicle)
    }

    /// Vacate whichever spot holds this registration
    pub fn remove_by_registration(&mut self, registration: &str) -> Result<(SpotId, Vehicle)> {
        let spot_id = self
            .parked
            .get(registration)
            .cloned()
            .ok_or_else(|| Error::VehicleNotFound(Registration::from(registration)))?;

        let vehicle = self.remove_by_spot(spot_id.as_str())?;
        Ok((spot_id, vehicle))
    }

    /// The spot holding this registration, if it is parked
    pub fn find_by_registration(&self, registration: &str) -> Option<&Spot> {
        self.parked
            .get(registration)
            .and_then(|spot_id| self.spots.get(spot_id))
    }

    /// Occupied spots whose vehicle make matches, ignoring case, in id order
    pub fn find_by_make(&self, make: &str) -> Vec<&Spot> {
        self.spots
            .values()
            .filter(|spot| spot.occupant().is_some_and(|v| v.is_make(make)))
            .collect()
    }

    /// Vacate every occupied spot. Returns how many were vacated.
    pub fn reset_all(&mut self) -> usize {
        let mut vacated = 0;
        for spot in self.spots.values_mut() {
            if spot.vacate().is_ok() {
                vacated += 1;
            }
        }
        self.parked.clear();

        info!("Reset car park, {} vehicles removed", vacated);
        vacated
    }

    /// All spots in id order
    pub fn spots(&self) -> impl Iterator<Item = &Spot> {
        self.spots.values()
    }

    /// Ids of vacant spots in id order
    pub fn vacant_spots(&self) -> Vec<&SpotId> {
        self.spots
            .values()
            .filter(|spot| !spot.is_occupied())
            .map(Spot::id)
            .collect()
    }

    pub fn total_count(&self) -> usize {
        self.spots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.parked.len()
    }

    pub fn vacant_count(&self) -> usize {
        self.total_count() - self.occupied_count()
    }

    pub fn summary(&self) -> OccupancySummary {
        OccupancySummary {
            total: self.total_count(),
            occupied: self.occupied_count(),
            vacant: self.vacant_count(),
        }
    }
}
