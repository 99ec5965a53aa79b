use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised while building or validating domain values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Template name cannot be empty")]
    EmptyTemplateName,

    #[error("Invalid template identifier '{input}': {reason}")]
    InvalidTemplateName { input: String, reason: String },

    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),

    #[error("Project manifest must be a JSON object")]
    ManifestNotObject,

    #[error("Invalid template descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Failed to serialise project manifest: {0}")]
    ManifestSerialization(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyTemplateName => vec![
                "Enter the npm package name of a template".into(),
                "Example: cra-template-universal-ts".into(),
            ],
            Self::InvalidTemplateName { input, .. } => vec![
                format!("'{}' is not a valid package identifier", input),
                "Use <name> or <name>@<version>, e.g. my-template@1.2.0".into(),
                "Scoped packages look like @scope/name@version".into(),
            ],
            Self::UnknownPackageManager(_) => vec![
                "Supported package managers:".into(),
                "  • npm".into(),
                "  • yarn".into(),
            ],
            Self::InvalidDescriptor(_) => vec![
                "The template's template.json could not be understood".into(),
                "Expected: { \"package\": { \"scripts\", \"dependencies\", \"devDependencies\" } }"
                    .into(),
            ],
            _ => vec!["See the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyTemplateName
            | Self::InvalidTemplateName { .. }
            | Self::UnknownPackageManager(_) => ErrorCategory::Validation,
            Self::ManifestNotObject | Self::InvalidDescriptor(_) => ErrorCategory::External,
            Self::ManifestSerialization(_) => ErrorCategory::Internal,
        }
    }
}
