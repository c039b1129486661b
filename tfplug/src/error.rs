//! Errors raised while reading or writing Terraform values

#[derive(Debug, thiserror::Error)]
pub enum TfplugError {
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Value of {0} is not yet known")]
    UnknownValue(String),

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Logging setup failed: {0}")]
    LoggingError(String),
}

pub type Result<T> = std::result::Result<T, TfplugError>;

impl TfplugError {
    /// True when the error only means the attribute is absent from the value
    pub fn is_missing(&self) -> bool {
        matches!(self, TfplugError::AttributeNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_absent_attributes_count_as_missing() {
        assert!(TfplugError::AttributeNotFound("port".to_string()).is_missing());
        assert!(!TfplugError::UnknownValue("port".to_string()).is_missing());
        assert_eq!(
            TfplugError::TypeMismatch {
                expected: "number".to_string(),
                actual: "string".to_string(),
            }
            .to_string(),
            "Type mismatch: expected number, got string"
        );
    }
}
