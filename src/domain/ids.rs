//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Store-assigned identifier of a plant record.
///
/// Identifiers are positive integers handed out in increasing order by the
/// store and never reused after the record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(i64);

impl PlantId {
    /// The identifier given to the first plant of an empty collection.
    pub const FIRST: PlantId = PlantId(1);

    /// Creates a PlantId from a raw integer.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` at `i64::MAX`.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<i64> for PlantId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlantId {
    type Err = ParseIntError;

    /// Parses a base-10 integer, as found in a request path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<i64>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_id_parses_decimal_integers() {
        assert_eq!("42".parse::<PlantId>().unwrap(), PlantId::new(42));
        assert_eq!("-3".parse::<PlantId>().unwrap(), PlantId::new(-3));
    }

    #[test]
    fn plant_id_rejects_non_integers() {
        assert!("abc".parse::<PlantId>().is_err());
        assert!("1.5".parse::<PlantId>().is_err());
        assert!("".parse::<PlantId>().is_err());
    }

    #[test]
    fn plant_id_next_increments() {
        assert_eq!(PlantId::FIRST.next(), Some(PlantId::new(2)));
    }

    #[test]
    fn plant_id_next_stops_at_max() {
        assert_eq!(PlantId::new(i64::MAX).next(), None);
    }

    #[test]
    fn plant_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&PlantId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
