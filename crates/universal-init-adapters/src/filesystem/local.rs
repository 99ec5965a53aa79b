//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use universal_init_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{InitError, InitResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> InitResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> InitResult<usize> {
        if !from.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Template directory not found".into(),
            }
            .into());
        }

        let mut copied = 0;
        for entry in WalkDir::new(from).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                InitError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {e}"),
                })
            })?;

            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| InitError::Internal {
                    message: format!("{} is outside {}", entry.path().display(), from.display()),
                })?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| map_io_error(parent, e, "create directory"))?;
                }
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(&target, e, "copy file"))?;
                trace!(file = %relative.display(), "copied");
                copied += 1;
            }
        }

        Ok(copied)
    }

    fn rename(&self, from: &Path, to: &Path) -> InitResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn write_file(&self, path: &Path, content: &str) -> InitResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> InitError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn copy_tree_copies_nested_files_and_counts_them() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), "gitignore", "node_modules\n");
        write(src.path(), "src/index.js", "console.log('hi');\n");
        write(src.path(), "src/components/App.js", "export default 1;\n");
        fs::create_dir_all(src.path().join("public")).unwrap();

        let copied = LocalFilesystem::new()
            .copy_tree(src.path(), dst.path())
            .unwrap();

        assert_eq!(copied, 3);
        assert_eq!(
            fs::read_to_string(dst.path().join("src/components/App.js")).unwrap(),
            "export default 1;\n"
        );
        assert!(dst.path().join("public").is_dir());
    }

    #[test]
    fn copy_tree_overwrites_existing_files() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), "README.md", "from template");
        write(dst.path(), "README.md", "old");

        LocalFilesystem::new()
            .copy_tree(src.path(), dst.path())
            .unwrap();

        assert_eq!(
            fs::read_to_string(dst.path().join("README.md")).unwrap(),
            "from template"
        );
    }

    #[test]
    fn copy_tree_fails_when_source_is_missing() {
        let dst = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .copy_tree(&dst.path().join("nope"), dst.path())
            .unwrap_err();

        assert!(matches!(
            err,
            InitError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn rename_moves_the_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "gitignore", "dist\n");
        let fs_adapter = LocalFilesystem::new();

        fs_adapter
            .rename(&dir.path().join("gitignore"), &dir.path().join(".gitignore"))
            .unwrap();

        assert!(!fs_adapter.exists(&dir.path().join("gitignore")));
        assert!(fs_adapter.exists(&dir.path().join(".gitignore")));
    }

    #[test]
    fn rename_of_missing_file_reports_the_source() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("eslintrc");

        match LocalFilesystem::new().rename(&from, &dir.path().join(".eslintrc")) {
            Err(InitError::Application(ApplicationError::FilesystemError { path, .. })) => {
                assert_eq!(path, from)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn write_file_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        write(dir.path(), "package.json", "{}");

        LocalFilesystem::new()
            .write_file(&path, "{\n  \"private\": true\n}\n")
            .unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("private"));
    }
}
