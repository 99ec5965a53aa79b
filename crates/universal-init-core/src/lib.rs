//! universal-init core - hexagonal layout for a template-driven project bootstrapper.
//!
//! This crate knows how a universal-scripts project is assembled from a
//! template package but never touches a process, a terminal, or the disk
//! directly. Everything external goes through the ports in
//! [`application::ports`].
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        universal-init-cli (CLI)         │
//! │   (prompts, config, logging, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, select_template)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CommandRunner, Filesystem, Loader ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   universal-init-adapters (Infra)       │
//! │ (SystemRunner, LocalFilesystem, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use universal_init_core::prelude::*;
//! # fn adapters() -> (Box<dyn CommandRunner>, Box<dyn Filesystem>, Box<dyn ManifestLoader>) { unimplemented!() }
//!
//! let (runner, filesystem, loader) = adapters();
//! let service = ScaffoldService::new(runner, filesystem, loader);
//!
//! let request = ScaffoldRequest::new(
//!     "/work/my-app",
//!     TemplatePackage::parse("cra-template-universal-ts").unwrap(),
//! );
//! service.ensure_target_absent(&request.project_root).unwrap();
//! let report = service.scaffold(request).unwrap();
//! println!("copied {} files", report.files_copied);
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        NoProgress, ScaffoldEvent, ScaffoldReport, ScaffoldRequest, ScaffoldService,
        ports::{CommandRunner, Filesystem, ManifestLoader, ProgressSink, TemplatePrompter},
        select_template,
    };
    pub use crate::domain::{
        CommandLine, Dependency, PackageManager, ProjectLayout, ProjectManifest, TemplateChoice,
        TemplateDescriptor, TemplatePackage,
    };
    pub use crate::error::{InitError, InitResult};
}
