//! Error taxonomy for provider operations

use std::fmt;
use thiserror::Error;

use crate::api::ApiError;
use crate::codec::CodecError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("field {field}: expected {expected}, got {actual}")]
    FieldTypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("field {field}: value {value} is not one of {allowed}")]
    FieldValidation {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("{0}")]
    RemoteNotFound(ApiError),

    #[error("{0}")]
    RemoteRejected(ApiError),

    #[error("Expected import identifier with format: ID. Got: {0:?}")]
    UnexpectedImportIdentifier(String),

    #[error("{0}")]
    AuthorizationFailure(ApiError),

    #[error("{0}")]
    Transport(ApiError),

    #[error("request cancelled or deadline exceeded")]
    Timeout,

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::RemoteNotFound(_))
    }
}

impl From<CodecError> for ProviderError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::FieldTypeMismatch {
                field,
                expected,
                actual,
            } => ProviderError::FieldTypeMismatch {
                field,
                expected: expected.to_string(),
                actual,
            },
            CodecError::FieldValidation {
                field,
                value,
                allowed,
            } => ProviderError::FieldValidation {
                field,
                value,
                allowed,
            },
        }
    }
}

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(_) => ProviderError::RemoteNotFound(err),
            ApiError::Rejected { .. } => ProviderError::RemoteRejected(err),
            ApiError::AuthError(_) => ProviderError::AuthorizationFailure(err),
            other => ProviderError::Transport(other),
        }
    }
}

impl From<tfplug::TfplugError> for ProviderError {
    fn from(err: tfplug::TfplugError) -> Self {
        ProviderError::InvalidState(err.to_string())
    }
}

/// The operation a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        };
        f.write_str(op)
    }
}

/// A failed operation with the context needed to report it
#[derive(Debug, Error)]
#[error("Unable to {op} {resource}, got error: {source}")]
pub struct OperationError {
    pub op: Operation,
    pub resource: String,
    /// Known for everything except a failed create
    pub id: Option<i64>,
    #[source]
    pub source: ProviderError,
}

impl OperationError {
    pub fn new(op: Operation, resource: &str, id: Option<i64>, source: ProviderError) -> Self {
        Self {
            op,
            resource: resource.to_string(),
            id,
            source,
        }
    }

    /// Summary line for the Terraform diagnostic
    pub fn summary(&self) -> &'static str {
        match self.source {
            ProviderError::UnexpectedImportIdentifier(_) => "Unexpected Import Identifier",
            _ => "Client Error",
        }
    }

    /// The detail names the id when one is known
    pub fn to_diagnostic(&self) -> tfplug::Diagnostic {
        match (&self.source, self.id) {
            (ProviderError::UnexpectedImportIdentifier(_), _) => {
                tfplug::Diagnostic::error(self.summary(), self.source.to_string())
            }
            (_, Some(id)) => {
                tfplug::Diagnostic::error(self.summary(), format!("{} (id {})", self, id))
            }
            (_, None) => tfplug::Diagnostic::error(self.summary(), self.to_string()),
        }
    }
}
