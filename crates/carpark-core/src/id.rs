use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a parking spot, e.g. `A001`.
///
/// The registry treats this as an opaque key. Format checks belong to the
/// caller (see [`crate::validation::validate_spot_id`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registration number of a vehicle, e.g. `B1234`.
///
/// Compared exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registration(String);

impl Registration {
    pub fn new(registration: impl Into<String>) -> Self {
        Self(registration.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_impls {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_impls!(SpotId);
string_id_impls!(Registration);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_their_raw_value() {
        assert_eq!(SpotId::from("A001").to_string(), "A001");
        assert_eq!(Registration::from("B1234").to_string(), "B1234");
    }

    #[test]
    fn test_registration_is_case_sensitive() {
        assert_ne!(Registration::from("B1234"), Registration::from("b1234"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&SpotId::from("C005")).unwrap();
        assert_eq!(json, "\"C005\"");
    }

    #[test]
    fn test_spot_ids_order_lexically() {
        let mut ids = vec![SpotId::from("B001"), SpotId::from("A002"), SpotId::from("A001")];
        ids.sort();
        assert_eq!(ids, vec![SpotId::from("A001"), SpotId::from("A002"), SpotId::from("B001")]);
    }
}
