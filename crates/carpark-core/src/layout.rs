//! Spot layouts used to pre-seed a registry
//!
//! A layout is a comma-separated list of spot ids or inclusive ranges within
//! one row letter, each optionally suffixed with a spot kind, e.g.
//! `A001-A005:handicapped,B001-B005:large,C010`. Entries without a suffix
//! are compact.

use std::str::FromStr;

use crate::error::Result;
use crate::id::SpotId;
use crate::registry::Registry;
use crate::spot::SpotKind;
use crate::validation::{validate_spot_id, ValidationError};

/// The 3x5 grid the car park starts with when nothing else is configured
pub const DEFAULT_LAYOUT: &str = "A001-A005,B001-B005,C001-C005";

/// An ordered list of spots to create at startup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpotLayout {
    spots: Vec<(SpotId, SpotKind)>,
}

impl SpotLayout {
    pub fn parse(layout: &str) -> std::result::Result<Self, ValidationError> {
        let mut spots = Vec::new();

        for entry in layout.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (ids, kind) = match entry.split_once(':') {
                None => (entry, SpotKind::default()),
                Some((ids, kind)) => {
                    let kind = kind
                        .trim()
                        .parse()
                        .map_err(|_| ValidationError::InvalidLayout(entry.to_string()))?;
                    (ids.trim(), kind)
                }
            };

            let expanded = match ids.split_once('-') {
                None => vec![validate_spot_id(ids)?],
                Some((start, end)) => expand_range(entry, start.trim(), end.trim())?,
            };
            spots.extend(expanded.into_iter().map(|id| (id, kind)));
        }

        Ok(Self { spots })
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Build a registry holding these spots, all vacant
    pub fn build(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        for (id, kind) in &self.spots {
            registry.add_spot_of_kind(id.clone(), *kind)?;
        }
        Ok(registry)
    }
}

impl FromStr for SpotLayout {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn expand_range(
    entry: &str,
    start: &str,
    end: &str,
) -> std::result::Result<Vec<SpotId>, ValidationError> {
    let start = validate_spot_id(start)?;
    let end = validate_spot_id(end)?;
    let invalid = || ValidationError::InvalidLayout(entry.to_string());

    let (row, first) = start.as_str().split_at(1);
    let (end_row, last) = end.as_str().split_at(1);
    if row != end_row {
        return Err(invalid());
    }

    let first: u16 = first.parse().map_err(|_| invalid())?;
    let last: u16 = last.parse().map_err(|_| invalid())?;
    if first > last {
        return Err(invalid());
    }

    Ok((first..=last)
        .map(|n| SpotId::new(format!("{}{:03}", row, n)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &Registry) -> Vec<&str> {
        registry.spots().map(|s| s.id().as_str()).collect()
    }

    #[test]
    fn test_default_layout_is_fifteen_spots() {
        let registry = SpotLayout::parse(DEFAULT_LAYOUT).unwrap().build().unwrap();
        let ids = ids(&registry);
        assert_eq!(ids.len(), 15);
        assert_eq!(ids[0], "A001");
        assert_eq!(ids[14], "C005");
    }

    #[test]
    fn test_single_ids_and_ranges() {
        let layout: SpotLayout = "A001, B009-B011 ,C100".parse().unwrap();
        assert_eq!(layout.len(), 5);
        assert_eq!(
            ids(&layout.build().unwrap()),
            vec!["A001", "B009", "B010", "B011", "C100"]
        );
    }

    #[test]
    fn test_kind_suffix() {
        let registry = SpotLayout::parse("A001-A002:handicapped, B001:Large, C001")
            .unwrap()
            .build()
            .unwrap();

        let kind = |id: &str| registry.find_spot(id).unwrap().kind();
        assert_eq!(kind("A001"), SpotKind::Handicapped);
        assert_eq!(kind("A002"), SpotKind::Handicapped);
        assert_eq!(kind("B001"), SpotKind::Large);
        assert_eq!(kind("C001"), SpotKind::Compact);
    }

    #[test]
    fn test_empty_layout() {
        let layout = SpotLayout::parse("").unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.build().unwrap().total_count(), 0);
    }

    #[test]
    fn test_rejects_bad_entries() {
        assert_eq!(
            SpotLayout::parse("A001-B003"),
            Err(ValidationError::InvalidLayout("A001-B003".to_string()))
        );
        assert_eq!(
            SpotLayout::parse("A005-A001"),
            Err(ValidationError::InvalidLayout("A005-A001".to_string()))
        );
        assert_eq!(
            SpotLayout::parse("A001:bus"),
            Err(ValidationError::InvalidLayout("A001:bus".to_string()))
        );
        assert_eq!(
            SpotLayout::parse("A1"),
            Err(ValidationError::InvalidSpotId("A1".to_string()))
        );
    }

    #[test]
    fn test_build_rejects_overlapping_ranges() {
        let layout = SpotLayout::parse("A001-A003,A002").unwrap();
        assert!(layout.build().is_err());
    }

    #[test]
    fn test_build_creates_vacant_spots() {
        let registry = SpotLayout::parse("A001-A003").unwrap().build().unwrap();
        assert_eq!(registry.total_count(), 3);
        assert_eq!(registry.vacant_count(), 3);
    }
}
