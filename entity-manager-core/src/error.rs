//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Snapshot fetch rejected by the backend
    #[error("Failed to load entities: {0}")]
    LoadFailed(String),

    /// Device registry fetch rejected by the backend
    #[error("Failed to load device registry: {0}")]
    DeviceRegistry(String),

    /// A mutation was rejected by the backend
    #[error("Failed to {action} {entity_id}: {message}")]
    Backend {
        action: String,
        entity_id: String,
        message: String,
    },

    /// Entity not found in the current snapshot or registry
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// A bulk action was requested with an empty selection
    #[error("No entities selected")]
    NoSelection,

    /// A rename was submitted without any effective change
    #[error("No changes detected")]
    NoChanges,

    /// A bulk rename find string matches none of the selected entities
    #[error("No entities match the find string")]
    NoMatches,

    /// Another mutation is still awaiting its backend response
    #[error("Another change is still being applied")]
    MutationInFlight,

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, stale ids, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::EntityNotFound(_)
            | Self::NoSelection
            | Self::NoChanges
            | Self::NoMatches
            | Self::MutationInFlight
            | Self::Validation(_) => true,
            Self::LoadFailed(_)
            | Self::DeviceRegistry(_)
            | Self::Backend { .. } => false,
        }
    }

    /// Build a [`CoreError::Backend`] for a rejected single-entity mutation.
    pub fn backend(action: &str, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            action: action.to_string(),
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Failure reason without the action prefix, for user-facing notices.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_expected() {
        assert!(CoreError::NoSelection.is_expected());
        assert!(CoreError::NoChanges.is_expected());
        assert!(CoreError::EntityNotFound("light.a".to_string()).is_expected());
    }

    #[test]
    fn backend_errors_are_not_expected() {
        assert!(!CoreError::LoadFailed("timeout".to_string()).is_expected());
        assert!(!CoreError::backend("enable", "light.a", "boom").is_expected());
    }

    #[test]
    fn backend_error_display_names_entity_and_reason() {
        let err = CoreError::backend("disable", "sensor.b", "not allowed");
        assert_eq!(err.to_string(), "Failed to disable sensor.b: not allowed");
        assert_eq!(err.reason(), "not allowed");
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::NoSelection).unwrap();
        assert_eq!(json["code"], "NoSelection");
    }
}
