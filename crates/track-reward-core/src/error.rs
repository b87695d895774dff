//! Error types for track reward evaluation

use thiserror::Error;

/// Result type for reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Reward evaluation error types
#[derive(Debug, Error, PartialEq)]
pub enum RewardError {
    /// Required observation key absent (or null) in the host payload
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Track geometry cannot be scored (width, waypoints, closest indices)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Observation carries a non-finite numeric value
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    /// Evaluator configuration rejected
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RewardError {
    fn from(err: serde_json::Error) -> Self {
        RewardError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_conversion() {
        let err: RewardError = serde_json::from_str::<u64>("\"x\"").unwrap_err().into();
        assert!(matches!(err, RewardError::SerializationError(_)));
    }

    #[test]
    fn test_display_names_field() {
        let err = RewardError::MissingField("track_width".into());
        assert_eq!(err.to_string(), "Missing field: track_width");
    }
}
