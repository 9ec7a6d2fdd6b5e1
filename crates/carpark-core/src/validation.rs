//! Input-format checks for callers of the registry
//!
//! The registry never calls these. Input layers (the HTTP service, a CLI, a
//! test driver) run them before handing identifiers to the registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{Registration, SpotId};
use crate::vehicle::{Vehicle, VehicleKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid spot ID '{0}': must be an uppercase letter followed by 3 digits")]
    InvalidSpotId(String),

    #[error("Invalid registration '{0}': must be an uppercase letter followed by 4 digits")]
    InvalidRegistration(String),

    #[error("Year {year} out of range: must be between {min} and {max}")]
    YearOutOfRange { year: i64, min: u16, max: u16 },

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid spot layout entry '{0}'")]
    InvalidLayout(String),
}

/// `[A-Z]` followed by exactly `digits` ASCII digits
fn letter_then_digits(s: &str, digits: usize) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == digits + 1
        && bytes[0].is_ascii_uppercase()
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

/// Check a spot id such as `A001`
pub fn validate_spot_id(id: &str) -> Result<SpotId, ValidationError> {
    if letter_then_digits(id, 3) {
        Ok(SpotId::from(id))
    } else {
        Err(ValidationError::InvalidSpotId(id.to_string()))
    }
}

/// Check a registration such as `B1234`
pub fn validate_registration(registration: &str) -> Result<Registration, ValidationError> {
    if letter_then_digits(registration, 4) {
        Ok(Registration::from(registration))
    } else {
        Err(ValidationError::InvalidRegistration(
            registration.to_string(),
        ))
    }
}

/// Inclusive range of accepted manufacture years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: u16,
    pub max: u16,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 2004,
            max: 2024,
        }
    }
}

impl YearRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn check(&self, year: i64) -> Result<u16, ValidationError> {
        if year >= i64::from(self.min) && year <= i64::from(self.max) {
            // in range implies it fits in u16
            Ok(year as u16)
        } else {
            Err(ValidationError::YearOutOfRange {
                year,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Unchecked vehicle details as supplied by an input layer
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleDraft {
    pub registration: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    #[serde(default)]
    pub kind: VehicleKind,
}

impl VehicleDraft {
    /// Validate every field and build the vehicle record
    pub fn validate(self, years: &YearRange) -> Result<Vehicle, ValidationError> {
        let registration = validate_registration(self.registration.trim())?;

        let make = self.make.trim();
        if make.is_empty() {
            return Err(ValidationError::EmptyField("make"));
        }
        let model = self.model.trim();
        if model.is_empty() {
            return Err(ValidationError::EmptyField("model"));
        }
        let year = years.check(self.year)?;

        Ok(Vehicle::new(registration, make, model, year).with_kind(self.kind))
    }
}
