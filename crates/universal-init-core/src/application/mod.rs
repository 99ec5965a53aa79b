//! Application layer.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`ScaffoldService`, `select_template`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Events**: progress notifications emitted while scaffolding
//! - **Errors**: orchestration failures

pub mod error;
pub mod events;
pub mod ports;
pub mod services;

pub use services::{
    MaterializeOutcome, RenameFailure, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    select_template,
};

pub use ports::{
    CommandRunner, Filesystem, ManifestLoader, NoProgress, ProgressSink, TemplatePrompter,
};

pub use error::ApplicationError;
pub use events::ScaffoldEvent;
