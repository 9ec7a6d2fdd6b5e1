use thiserror::Error;

use crate::id::{Registration, SpotId};

/// Registry and spot failures.
///
/// Every variant is a caller-input error: the registry is left exactly as it
/// was before the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Spot not found: {0}")]
    SpotNotFound(SpotId),

    #[error("Spot already exists: {0}")]
    DuplicateSpot(SpotId),

    #[error("Spot is occupied: {0}")]
    SpotOccupied(SpotId),

    /// Raised by `Spot::occupy` itself. The registry checks first, so seeing
    /// this from a registry call means the pre-check was skipped.
    #[error("Spot already occupied: {0}")]
    AlreadyOccupied(SpotId),

    #[error("Spot already vacant: {0}")]
    AlreadyVacant(SpotId),

    #[error("Vehicle already parked: {0}")]
    VehicleAlreadyParked(Registration),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(Registration),
}

impl Error {
    /// True for the kinds that mean "the thing you named does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SpotNotFound(_) | Error::VehicleNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
