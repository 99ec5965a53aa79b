//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use serde_json::Value;

use crate::application::ScaffoldEvent;
use crate::domain::{CommandLine, TemplateChoice};
use crate::error::InitResult;

/// Port for running external programs.
///
/// Implemented by:
/// - `universal_init_adapters::process::SystemRunner` (production)
/// - `universal_init_adapters::process::RecordingRunner` (testing)
///
/// Calls block until the child exits. Child output is never forwarded to the
/// terminal.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` inside `cwd`; non-zero exit is an error.
    fn run(&self, command: &CommandLine, cwd: &Path) -> InitResult<()>;

    /// Run `command` in the current directory and report whether it
    /// succeeded. Never fails.
    fn probe(&self, command: &CommandLine) -> bool;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `universal_init_adapters::filesystem::LocalFilesystem` (production)
/// - `universal_init_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> InitResult<()>;

    /// Recursively copy the contents of `from` into `to`, overwriting
    /// existing files. Returns the number of files copied.
    fn copy_tree(&self, from: &Path, to: &Path) -> InitResult<usize>;

    fn rename(&self, from: &Path, to: &Path) -> InitResult<()>;

    /// Replace the file at `path` with `content`.
    fn write_file(&self, path: &Path, content: &str) -> InitResult<()>;
}

/// Port for reading a JSON document (the project manifest or a template
/// descriptor) into a structured value.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestLoader: Send + Sync {
    fn load(&self, path: &Path) -> InitResult<Value>;
}

/// Port for the interactive template prompts.
#[cfg_attr(test, mockall::automock)]
pub trait TemplatePrompter {
    /// Show the template list and return the chosen entry.
    fn select_template(&self, choices: &[TemplateChoice]) -> InitResult<TemplateChoice>;

    /// Ask for a custom template identifier.
    fn custom_template(&self) -> InitResult<String>;

    /// Tell the operator why the last answer was rejected.
    fn reject(&self, reason: &str);
}

/// Receives phase notifications while a scaffold runs.
pub trait ProgressSink: Send + Sync {
    fn event(&self, event: &ScaffoldEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn event(&self, _event: &ScaffoldEvent) {}
}
