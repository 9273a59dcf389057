//! The plant record and its writable fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PlantId;

/// The fields of a plant that a client supplies.
///
/// Create and upsert both take a `NewPlant`; the store owns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    pub name: String,
    #[serde(default)]
    pub other_names: Vec<String>,
    pub light: String,
    pub humidity: String,
    pub water: String,
}

impl NewPlant {
    /// Attaches a store-assigned identifier.
    pub fn with_id(self, id: PlantId) -> Plant {
        Plant {
            id,
            name: self.name,
            other_names: self.other_names,
            light: self.light,
            humidity: self.humidity,
            water: self.water,
        }
    }
}

/// A persisted plant.
///
/// Serializes with the public field names `id`, `name`, `otherNames`,
/// `light`, `humidity` and `water`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    #[serde(default)]
    pub other_names: Vec<String>,
    pub light: String,
    pub humidity: String,
    pub water: String,
}

impl Plant {
    /// Drops the identifier, leaving the client-supplied fields.
    pub fn into_new(self) -> NewPlant {
        NewPlant {
            name: self.name,
            other_names: self.other_names,
            light: self.light,
            humidity: self.humidity,
            water: self.water,
        }
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, Name: {}, OtherNames: [{}], Light: {}, Humidity: {}, Water: {}",
            self.id,
            self.name,
            self.other_names.join(", "),
            self.light,
            self.humidity,
            self.water
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aloe() -> NewPlant {
        NewPlant {
            name: "Aloe".to_string(),
            other_names: vec![],
            light: "low".to_string(),
            humidity: "low".to_string(),
            water: "low".to_string(),
        }
    }

    #[test]
    fn with_id_then_into_new_preserves_fields() {
        let plant = aloe().with_id(PlantId::new(3));
        assert_eq!(plant.id, PlantId::new(3));
        assert_eq!(plant.into_new(), aloe());
    }

    #[test]
    fn plant_serializes_with_camel_case_fields_in_order() {
        let plant = NewPlant {
            name: "Plant A".to_string(),
            other_names: vec!["Other name A".to_string()],
            light: "low".to_string(),
            humidity: "high".to_string(),
            water: "low".to_string(),
        }
        .with_id(PlantId::new(99));

        assert_eq!(
            serde_json::to_string(&plant).unwrap(),
            r#"{"id":99,"name":"Plant A","otherNames":["Other name A"],"light":"low","humidity":"high","water":"low"}"#
        );
    }

    #[test]
    fn plant_display_is_single_line() {
        let mut plant = aloe().with_id(PlantId::new(1));
        plant.other_names = vec!["Burn plant".to_string(), "Lily of the desert".to_string()];
        assert_eq!(
            plant.to_string(),
            "Id: 1, Name: Aloe, OtherNames: [Burn plant, Lily of the desert], Light: low, Humidity: low, Water: low"
        );
    }
}
