//! Error types for the arbok wrapper

use thiserror::Error;

/// Result type alias for arbok operations
pub type Result<T> = std::result::Result<T, ArbokError>;

/// Main error type for arbok
#[derive(Error, Debug)]
pub enum ArbokError {
    /// Malformed or inconsistent training input. Eligible for retry.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model not fitted")]
    NotFitted,

    /// The wrapped estimator cannot provide the requested operation.
    #[error("Capability not supported: {0}")]
    CapabilityNotSupported(String),

    /// An extension point was called without a concrete implementation.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Raised by estimators that do not expose an operation at all.
    #[error("Missing capability: {0}")]
    MissingCapability(String),

    /// Raised by estimators when an operation fails at runtime.
    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Estimator error: {0}")]
    Estimator(String),

    #[error("Preprocessing error: {0}")]
    Preprocessing(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },
}

impl ArbokError {
    /// Whether the error belongs to the validation class that `fit` may retry.
    pub fn is_validation(&self) -> bool {
        matches!(self, ArbokError::Validation(_))
    }

    /// Whether the error signals that an estimator cannot perform an operation.
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(
            self,
            ArbokError::MissingCapability(_) | ArbokError::Runtime(_)
        )
    }
}

impl From<serde_json::Error> for ArbokError {
    fn from(err: serde_json::Error) -> Self {
        ArbokError::Serialization(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ArbokError {
    fn from(err: ndarray::ShapeError) -> Self {
        ArbokError::Shape {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArbokError::Validation("empty input".to_string());
        assert_eq!(err.to_string(), "Validation error: empty input");
        assert_eq!(ArbokError::NotFitted.to_string(), "Model not fitted");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = ArbokError::InvalidParameter {
            name: "refit".to_string(),
            value: "\"yes\"".to_string(),
            reason: "expected a boolean".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter: refit = \"yes\", expected a boolean"
        );
    }

    #[test]
    fn test_error_classes() {
        assert!(ArbokError::Validation("x".into()).is_validation());
        assert!(!ArbokError::Estimator("x".into()).is_validation());
        assert!(ArbokError::MissingCapability("x".into()).is_unsupported_operation());
        assert!(ArbokError::Runtime("x".into()).is_unsupported_operation());
        assert!(!ArbokError::NotFitted.is_unsupported_operation());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ArbokError = json_err.into();
        assert!(matches!(err, ArbokError::Serialization(_)));
    }
}
