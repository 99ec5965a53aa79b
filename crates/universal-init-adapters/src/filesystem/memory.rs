//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde_json::Value;

use universal_init_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestLoader},
    },
    error::{InitError, InitResult},
};

/// In-memory filesystem for testing.
///
/// Also serves as a [`ManifestLoader`] so JSON files written into it can be
/// read back by the scaffold service.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    locked: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_chain(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Make every later rename of `path` fail.
    pub fn lock_file(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.locked.insert(path.as_ref().to_path_buf());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> InitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> InitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .is_ok_and(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
    }

    fn create_dir_all(&self, path: &Path) -> InitResult<()> {
        self.write()?.add_dir_chain(path);
        Ok(())
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> InitResult<usize> {
        let mut inner = self.write()?;
        if !inner.directories.contains(from) {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Template directory not found".into(),
            }
            .into());
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok())
            .map(|rel| to.join(rel))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, content)| {
                p.strip_prefix(from)
                    .ok()
                    .map(|rel| (to.join(rel), content.clone()))
            })
            .collect();

        for dir in dirs {
            inner.add_dir_chain(&dir);
        }
        let copied = files.len();
        for (path, content) in files {
            if let Some(parent) = path.parent() {
                inner.add_dir_chain(parent);
            }
            inner.files.insert(path, content);
        }

        Ok(copied)
    }

    fn rename(&self, from: &Path, to: &Path) -> InitResult<()> {
        let mut inner = self.write()?;
        if inner.locked.contains(from) {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Failed to rename: Permission denied".into(),
            }
            .into());
        }

        let content = inner.files.remove(from).ok_or_else(|| {
            InitError::from(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "Failed to rename: No such file".into(),
            })
        })?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> InitResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

impl ManifestLoader for MemoryFilesystem {
    fn load(&self, path: &Path) -> InitResult<Value> {
        let inner = self.read()?;
        let raw = inner.files.get(path).ok_or_else(|| {
            InitError::from(ApplicationError::ManifestLoad {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            })
        })?;

        serde_json::from_str(raw).map_err(|e| {
            ApplicationError::ManifestLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn poisoned() -> InitError {
    InitError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_tree_mirrors_files_under_target() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/node_modules/t/template/gitignore", "dist");
        fs.add_file("/p/node_modules/t/template/src/index.js", "1");
        fs.add_file("/p/node_modules/t/template.json", "{}");

        let copied = fs
            .copy_tree(Path::new("/p/node_modules/t/template"), Path::new("/p"))
            .unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs.read_file(Path::new("/p/gitignore")).unwrap(), "dist");
        assert!(fs.exists(Path::new("/p/src")));
        assert!(!fs.exists(Path::new("/p/template.json")));
    }

    #[test]
    fn locked_file_cannot_be_renamed() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/eslintrc", "{}");
        fs.lock_file("/p/eslintrc");

        assert!(
            fs.rename(Path::new("/p/eslintrc"), Path::new("/p/.eslintrc"))
                .is_err()
        );
        assert!(fs.exists(Path::new("/p/eslintrc")));
    }

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(
            fs.write_file(Path::new("/missing/package.json"), "{}")
                .is_err()
        );

        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/package.json"), "{}").unwrap();
    }

    #[test]
    fn load_parses_json() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/package.json", r#"{"name":"x"}"#);
        fs.add_file("/p/broken.json", "{");

        assert_eq!(fs.load(Path::new("/p/package.json")).unwrap()["name"], "x");
        assert!(matches!(
            fs.load(Path::new("/p/broken.json")),
            Err(InitError::Application(ApplicationError::ManifestLoad { .. }))
        ));
    }
}
