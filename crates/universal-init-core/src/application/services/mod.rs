//! Application services - orchestrate use cases.

pub mod scaffold_service;
pub mod template_selection;

pub use scaffold_service::{
    MaterializeOutcome, RenameFailure, ScaffoldReport, ScaffoldRequest, ScaffoldService,
};
pub use template_selection::select_template;
