//! Thread-safe handle over a [`Registry`]
//!
//! Every check-then-act operation runs entirely under the write lock; queries
//! take the read lock and return owned snapshots so callers never hold it.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::error::{Error, Result};
use crate::id::SpotId;
use crate::registry::{OccupancySummary, Registry};
use crate::spot::{Spot, SpotKind};
use crate::vehicle::Vehicle;

/// Cloneable handle to one registry shared between threads or tasks
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    // A panic while holding the lock cannot leave the registry half-updated:
    // mutations only write after all checks pass. Recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("Registry lock poisoned, recovering for read");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("Registry lock poisoned, recovering for write");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Run a read-only closure against a consistent view of the registry
    pub fn with<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.read())
    }

    pub fn add_spot(&self, id: impl Into<SpotId>) -> Result<()> {
        self.write().add_spot(id)
    }

    pub fn add_spot_of_kind(&self, id: impl Into<SpotId>, kind: SpotKind) -> Result<()> {
        self.write().add_spot_of_kind(id, kind)
    }

    pub fn delete_spot(&self, id: &str) -> Result<Spot> {
        self.write().delete_spot(id)
    }

    pub fn find_spot(&self, id: &str) -> Option<Spot> {
        self.read().find_spot(id).cloned()
    }

    pub fn is_vehicle_present(&self, registration: &str) -> bool {
        self.read().is_vehicle_present(registration)
    }

    /// Park a vehicle and return the spot as it stands right after parking.
    ///
    /// The snapshot is taken under the same write guard as the park itself.
    pub fn park(&self, spot_id: &str, vehicle: Vehicle) -> Result<Spot> {
        let mut registry = self.write();
        registry.park(spot_id, vehicle)?;
        registry
            .find_spot(spot_id)
            .cloned()
            .ok_or_else(|| Error::SpotNotFound(SpotId::from(spot_id)))
    }

    pub fn remove_by_spot(&self, spot_id: &str) -> Result<Vehicle> {
        self.write().remove_by_spot(spot_id)
    }

    pub fn remove_by_registration(&self, registration: &str) -> Result<(SpotId, Vehicle)> {
        self.write().remove_by_registration(registration)
    }

    pub fn find_by_registration(&self, registration: &str) -> Option<Spot> {
        self.read().find_by_registration(registration).cloned()
    }

    pub fn find_by_make(&self, make: &str) -> Vec<Spot> {
        self.read().find_by_make(make).into_iter().cloned().collect()
    }

    pub fn reset_all(&self) -> usize {
        self.write().reset_all()
    }

    pub fn spots(&self) -> Vec<Spot> {
        self.read().spots().cloned().collect()
    }

    pub fn vacant_spots(&self) -> Vec<SpotId> {
        self.read().vacant_spots().into_iter().cloned().collect()
    }

    pub fn total_count(&self) -> usize {
        self.read().total_count()
    }

    pub fn occupied_count(&self) -> usize {
        self.read().occupied_count()
    }

    pub fn vacant_count(&self) -> usize {
        self.read().vacant_count()
    }

    pub fn summary(&self) -> OccupancySummary {
        self.read().summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn vehicle(registration: &str) -> Vehicle {
        Vehicle::new(registration, "Toyota", "Corolla", 2018)
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedRegistry::new(Registry::with_spots(["A001"]).unwrap());
        let other = shared.clone();

        shared.park("A001", vehicle("B1234")).unwrap();
        assert!(other.is_vehicle_present("B1234"));
        assert_eq!(other.occupied_count(), 1);
    }

    #[test]
    fn test_park_returns_occupied_snapshot() {
        let shared = SharedRegistry::new(Registry::with_spots(["A001"]).unwrap());

        let spot = shared.park("A001", vehicle("B1234")).unwrap();
        assert_eq!(spot.id().as_str(), "A001");
        assert!(spot.is_occupied());
        assert_eq!(spot.occupant().unwrap().registration.as_str(), "B1234");
        assert_eq!(spot.parked_at(), shared.find_spot("A001").unwrap().parked_at());
    }

    #[test]
    fn test_park_snapshot_survives_later_vacate_and_delete() {
        let shared = SharedRegistry::new(Registry::with_spots(["A001"]).unwrap());
        let other = shared.clone();

        let parker = thread::spawn(move || other.park("A001", vehicle("B1234")));
        let snapshot = parker.join().unwrap().unwrap();

        shared.remove_by_spot("A001").unwrap();
        shared.delete_spot("A001").unwrap();

        assert!(snapshot.is_occupied());
        assert!(shared.find_spot("A001").is_none());
    }

    #[test]
    fn test_vacant_spots_and_kinds() {
        let shared = SharedRegistry::new(Registry::with_spots(["A001", "A002"]).unwrap());
        shared.add_spot_of_kind("H001", SpotKind::Handicapped).unwrap();
        shared.park("A001", vehicle("B1234")).unwrap();

        let vacant: Vec<String> = shared.vacant_spots().iter().map(|id| id.to_string()).collect();
        assert_eq!(vacant, vec!["A002", "H001"]);
        assert_eq!(shared.find_spot("H001").unwrap().kind(), SpotKind::Handicapped);
    }

    #[test]
    fn test_same_vehicle_racing_into_many_spots() {
        let ids: Vec<String> = (0..16).map(|i| format!("A{:03}", i)).collect();
        let shared = SharedRegistry::new(Registry::with_spots(ids.clone()).unwrap());

        let handles: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let shared = shared.clone();
                thread::spawn(move || shared.park(&id, vehicle("B1234")))
            })
            .collect();

        let results: Vec<Result<Spot>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let parked = results.iter().filter(|r| r.is_ok()).count();

        assert_eq!(parked, 1);
        assert!(results.iter().all(|r| match r {
            Ok(_) => true,
            Err(e) => *e == Error::VehicleAlreadyParked("B1234".into()),
        }));
        assert_eq!(shared.occupied_count(), 1);
    }

    #[test]
    fn test_many_vehicles_racing_into_one_spot() {
        let shared = SharedRegistry::new(Registry::with_spots(["A001"]).unwrap());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || shared.park("A001", vehicle(&format!("B{:04}", i))))
            })
            .collect();

        let parked = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(parked, 1);
        assert_eq!(shared.summary().occupied, 1);
    }

    #[test]
    fn test_concurrent_vacate_happens_once() {
        let shared = SharedRegistry::new(Registry::with_spots(["A001"]).unwrap());
        shared.park("A001", vehicle("B1234")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.remove_by_spot("A001"))
            })
            .collect();

        let vacated = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(vacated, 1);
        assert_eq!(shared.vacant_count(), 1);
    }

    #[test]
    fn test_counts_stay_consistent_under_load() {
        let ids: Vec<String> = (0..8).map(|i| format!("A{:03}", i)).collect();
        let shared = SharedRegistry::new(Registry::with_spots(ids).unwrap());

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for round in 0..50 {
                        let spot = format!("A{:03}", (t + round) % 8);
                        let reg = format!("B{}{:03}", t, round % 10);
                        let _ = shared.park(&spot, vehicle(&reg));
                        let _ = shared.remove_by_registration(&reg);
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            shared.with(|registry| {
                assert_eq!(
                    registry.occupied_count() + registry.vacant_count(),
                    registry.total_count()
                );
            });
        }

        for w in writers {
            w.join().unwrap();
        }
        assert_eq!(shared.occupied_count(), 0);
    }
}
