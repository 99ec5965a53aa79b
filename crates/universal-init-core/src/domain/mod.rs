//! Domain layer: template identifiers, package-manager flavors, the project
//! manifest and its on-disk layout. Pure values, no I/O.

pub mod error;
pub mod layout;
pub mod manifest;
pub mod package_manager;
pub mod template;

pub use error::DomainError;
pub use layout::{DOTFILE_TEMPLATES, DotfileRename, ProjectLayout};
pub use manifest::{
    DEFAULT_SCRIPTS, Dependency, NODE_ENGINE, ProjectManifest, TOOLING_DEPENDENCY,
    TemplateDescriptor,
};
pub use package_manager::{CommandLine, PackageManager};
pub use template::{JAVASCRIPT_TEMPLATE, TYPESCRIPT_TEMPLATE, TemplateChoice, TemplatePackage};
