//! Application layer errors.
//!
//! These errors represent failures in orchestration, not invalid values.
//! Invalid values are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffold phases.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target directory is already there.
    #[error("Directory already exists: {path}")]
    ProjectExists { path: PathBuf },

    /// `npm init` or the template install failed.
    #[error("Failed to install template {template}: {reason}")]
    TemplateInstall { template: String, reason: String },

    /// Installing the merged dependency lists failed.
    #[error("Failed to install dependencies ({command}): {reason}")]
    DependencyInstall { command: String, reason: String },

    /// Uninstalling the template package failed.
    #[error("Failed to remove template {template}: {reason}")]
    TemplateRemoval { template: String, reason: String },

    /// An external command could not be run or exited non-zero.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A JSON file could not be read or parsed.
    #[error("Failed to load {path}: {reason}")]
    ManifestLoad { path: PathBuf, reason: String },

    /// The interactive prompt could not be shown or read.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The operator aborted the prompt (Ctrl-C / Esc).
    #[error("Template selection cancelled")]
    PromptCancelled,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("'{}' is already there", path.display()),
                "Use another name".into(),
                format!("Or remove it first: rm -rf {}", path.display()),
            ],
            Self::TemplateInstall { template, .. } => vec![
                format!("Check that '{}' exists on the npm registry", template),
                "Check your network connection and registry settings".into(),
                "Re-run with -vv to see the package manager output".into(),
            ],
            Self::DependencyInstall { .. } | Self::TemplateRemoval { .. } => vec![
                "The project directory was left in place".into(),
                "Finish the step by hand from inside the project directory".into(),
                "Re-run with -vv to see the package manager output".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Failed command: {}", command),
                "Ensure npm (or yarn) is installed and in your PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ManifestLoad { path, .. } => vec![
                format!("Check that {} is valid JSON", path.display()),
            ],
            Self::PromptFailed { .. } => vec![
                "Run in an interactive terminal, or pass --template <ID>".into(),
            ],
            Self::PromptCancelled => vec!["No changes were made".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::TemplateInstall { .. }
            | Self::DependencyInstall { .. }
            | Self::TemplateRemoval { .. }
            | Self::CommandFailed { .. }
            | Self::ManifestLoad { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } | Self::PromptFailed { .. } => ErrorCategory::Internal,
            Self::PromptCancelled => ErrorCategory::Cancelled,
        }
    }
}
