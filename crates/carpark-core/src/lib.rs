//! Spot registry and occupancy state machine for a car park.
//!
//! [`Registry`] owns every [`Spot`] and enforces the cross-spot rules: spot ids
//! are unique, only vacant spots can be deleted, and a registration can be
//! parked in at most one spot at a time. [`SharedRegistry`] wraps it for
//! concurrent callers.

pub mod error;
pub mod id;
pub mod layout;
pub mod registry;
pub mod shared;
pub mod spot;
pub mod validation;
pub mod vehicle;

pub use error::{Error, Result};
pub use id::{Registration, SpotId};
pub use layout::{SpotLayout, DEFAULT_LAYOUT};
pub use registry::{OccupancySummary, Registry};
pub use shared::SharedRegistry;
pub use spot::{Spot, SpotKind};
pub use validation::{ValidationError, VehicleDraft, YearRange};
pub use vehicle::{Vehicle, VehicleKind};
