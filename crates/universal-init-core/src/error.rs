//! Unified error handling for universal-init core.
//!
//! Domain and application errors are wrapped in [`InitError`] so adapters and
//! the CLI only ever deal with one result type.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for core operations.
#[derive(Debug, Error, Clone)]
pub enum InitError {
    /// Invalid values (template identifiers, manifests).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Failures while orchestrating the scaffold.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl InitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in universal-init".into(),
                "Please report it together with the output of -vv".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input (template identifiers, names).
    Validation,
    /// The target already exists.
    Conflict,
    /// An external tool (the package manager) failed.
    External,
    /// The operator aborted a prompt.
    Cancelled,
    Internal,
}

/// Convenient result type alias.
pub type InitResult<T> = Result<T, InitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn project_exists_is_a_conflict() {
        let err: InitError = ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/app"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(err.to_string().contains("/tmp/app"));
    }

    #[test]
    fn empty_template_is_validation() {
        let err: InitError = DomainError::EmptyTemplateName.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn internal_errors_ask_for_a_report() {
        let err = InitError::Internal {
            message: "boom".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("report")));
    }
}
