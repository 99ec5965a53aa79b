//! Where things live inside a project being scaffolded.

use std::path::{Path, PathBuf};

use crate::domain::TemplatePackage;

pub const MANIFEST_FILE: &str = "package.json";
pub const PACKAGES_DIR: &str = "node_modules";
pub const TEMPLATE_FILES_DIR: &str = "template";
pub const TEMPLATE_DESCRIPTOR_FILE: &str = "template.json";

/// Files templates ship without their leading dot (npm drops dotfiles such
/// as `.gitignore` from published tarballs).
pub const DOTFILE_TEMPLATES: [&str; 4] = ["gitignore", "eslintrc", "prettierrc", "prettierignore"];

/// One `name` → `.name` rename inside the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotfileRename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Paths of a project rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// `node_modules/<name>`; the version suffix never appears on disk.
    pub fn template_package_dir(&self, template: &TemplatePackage) -> PathBuf {
        self.root.join(PACKAGES_DIR).join(template.name())
    }

    pub fn template_files_dir(&self, template: &TemplatePackage) -> PathBuf {
        self.template_package_dir(template).join(TEMPLATE_FILES_DIR)
    }

    pub fn template_descriptor_path(&self, template: &TemplatePackage) -> PathBuf {
        self.template_package_dir(template)
            .join(TEMPLATE_DESCRIPTOR_FILE)
    }

    pub fn dotfile_renames(&self) -> Vec<DotfileRename> {
        DOTFILE_TEMPLATES
            .iter()
            .map(|name| DotfileRename {
                from: self.root.join(name),
                to: self.root.join(format!(".{name}")),
            })
            .collect()
    }
}
