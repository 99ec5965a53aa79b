//! Progress notifications emitted by [`crate::application::ScaffoldService`].

use std::path::PathBuf;

use crate::domain::{PackageManager, TemplatePackage};

/// One step of a scaffold run, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    PackageManagerSelected {
        package_manager: PackageManager,
        detected: bool,
    },
    CreatingDirectory {
        path: PathBuf,
    },
    InstallingTemplate {
        template: TemplatePackage,
    },
    CopyingFiles,
    /// A dotfile template could not be renamed; the run continues.
    RenameFailed {
        path: PathBuf,
        reason: String,
    },
    MergingManifest,
    InstallingDependencies {
        count: usize,
    },
    SkippedDependencies,
    InstallingDevDependencies {
        count: usize,
    },
    SkippedDevDependencies,
    RemovingTemplate {
        template: TemplatePackage,
    },
    Finished,
}

impl ScaffoldEvent {
    /// `true` for events that start a long-running package-manager call.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::InstallingTemplate { .. }
                | Self::InstallingDependencies { .. }
                | Self::InstallingDevDependencies { .. }
                | Self::RemovingTemplate { .. }
        )
    }
}
