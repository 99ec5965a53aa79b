//! JSON file loader for `package.json` and `template.json`.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::{debug, instrument};

use universal_init_core::{
    application::{ApplicationError, ports::ManifestLoader},
    error::InitResult,
};

/// Reads and parses JSON documents from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileLoader;

impl JsonFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestLoader for JsonFileLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> InitResult<Value> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::ManifestLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let value = serde_json::from_str(&raw).map_err(|e| ApplicationError::ManifestLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(bytes = raw.len(), "loaded");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use universal_init_core::error::InitError;

    #[test]
    fn loads_a_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.json");
        fs::write(&path, r#"{"package":{"dependencies":{"react":"^18.2.0"}}}"#).unwrap();

        let value = JsonFileLoader::new().load(&path).unwrap();
        assert_eq!(value["package"]["dependencies"]["react"], "^18.2.0");
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.json");

        match JsonFileLoader::new().load(&path) {
            Err(InitError::Application(ApplicationError::ManifestLoad { path: p, .. })) => {
                assert_eq!(p, path)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ \"name\": ").unwrap();

        assert!(JsonFileLoader::new().load(&path).is_err());
    }
}
