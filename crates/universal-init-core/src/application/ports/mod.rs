//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented in
//!   `universal-init-adapters` or the CLI
//!   - `CommandRunner`: package-manager invocations
//!   - `Filesystem`: directory creation, tree copy, rename, write
//!   - `ManifestLoader`: JSON file loading
//!   - `TemplatePrompter`: interactive template selection
//!   - `ProgressSink`: phase notifications

pub mod output;

pub use output::{
    CommandRunner, Filesystem, ManifestLoader, NoProgress, ProgressSink, TemplatePrompter,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockManifestLoader, MockTemplatePrompter};
