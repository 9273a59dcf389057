//! HTTP DTOs for plant endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::{NewPlant, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /plants` and `PUT /plants/{id}`.
///
/// Every field is optional at the parsing stage so that missing values are
/// reported by [`PlantRequest::validate`] rather than as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub other_names: Option<Vec<String>>,
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub humidity: Option<String>,
    #[serde(default)]
    pub water: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl PlantRequest {
    /// Collects every missing required value.
    ///
    /// `name` is checked when `name_required` is set, or whenever the client
    /// sent one: an explicitly empty name is never accepted.
    pub fn validate(&self, name_required: bool) -> Result<(), ValidationError> {
        let mut messages = Vec::new();
        if (name_required || self.name.is_some()) && is_blank(&self.name) {
            messages.push(ValidationError::required_message("name"));
        }
        for (field, value) in [
            ("light", &self.light),
            ("humidity", &self.humidity),
            ("water", &self.water),
        ] {
            if is_blank(value) {
                messages.push(ValidationError::required_message(field));
            }
        }
        ValidationError::from_messages(messages)
    }

    /// Builds the domain fields using `name` as the plant name.
    pub fn into_new_plant(self, name: String) -> NewPlant {
        NewPlant {
            name,
            other_names: self.other_names.unwrap_or_default(),
            light: self.light.unwrap_or_default(),
            humidity: self.humidity.unwrap_or_default(),
            water: self.water.unwrap_or_default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Empty JSON object returned by successful writes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyResponse {}

/// Standard error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub const INVALID_ID: &'static str = "The Plant id must be an integer";
    pub const INVALID_PAYLOAD: &'static str = "The request payload could not be parsed into a Plant";
    pub const NOT_FOUND: &'static str = "The specified Plant was not found";
    pub const INTERNAL: &'static str = "An error occurred while processing the request";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn conflict(key: &str, value: &str) -> Self {
        Self::new(format!("Plant with {} '{}' already exists", key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> PlantRequest {
        serde_json::from_str(
            r#"{"name":"Aloe","otherNames":["Burn plant"],"light":"low","humidity":"low","water":"low"}"#,
        )
        .unwrap()
    }

    #[test]
    fn plant_request_deserializes_camel_case() {
        let req = full_request();
        assert_eq!(req.name.as_deref(), Some("Aloe"));
        assert_eq!(req.other_names, Some(vec!["Burn plant".to_string()]));
    }

    #[test]
    fn plant_request_rejects_wrong_field_types() {
        let result = serde_json::from_str::<PlantRequest>(r#"{"name":123,"invalid":"plant"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(full_request().validate(true).is_ok());
    }

    #[test]
    fn missing_fields_accumulate_in_order() {
        let err = PlantRequest::default().validate(true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The name value is required; The light value is required; \
             The humidity value is required; The water value is required"
        );
    }

    #[test]
    fn absent_name_is_allowed_when_not_required() {
        let req = PlantRequest {
            name: None,
            ..full_request()
        };
        assert!(req.validate(false).is_ok());
    }

    #[test]
    fn empty_name_is_rejected_even_when_not_required() {
        let req = PlantRequest {
            name: Some(String::new()),
            ..full_request()
        };
        assert_eq!(
            req.validate(false).unwrap_err().to_string(),
            "The name value is required"
        );
    }

    #[test]
    fn missing_other_names_defaults_to_empty() {
        let req: PlantRequest =
            serde_json::from_str(r#"{"name":"Aloe","light":"low","humidity":"low","water":"low"}"#)
                .unwrap();
        let plant = req.into_new_plant("Aloe".to_string());
        assert!(plant.other_names.is_empty());
    }

    #[test]
    fn empty_response_serializes_as_empty_object() {
        assert_eq!(serde_json::to_string(&EmptyResponse {}).unwrap(), "{}");
    }

    #[test]
    fn conflict_message_names_key_and_value() {
        let error = ErrorResponse::conflict("name", "plant X");
        assert_eq!(error.error, "Plant with name 'plant X' already exists");
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"error":"Plant with name 'plant X' already exists"}"#
        );
    }
}
