//! Error types for the domain layer.

use thiserror::Error;

/// Accumulated input problems for a plant request.
///
/// Each message is a complete sentence; the display form joins them with
/// `"; "` so that every violation is reported at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    /// Creates an error from a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Message for a required field that is missing or empty.
    pub fn required_message(field: &str) -> String {
        format!("The {} value is required", field)
    }

    /// Returns `Ok(())` when no messages were collected.
    pub fn from_messages(messages: Vec<String>) -> Result<(), Self> {
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Self { messages })
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
