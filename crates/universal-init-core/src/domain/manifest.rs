//! `package.json` merging and the template's `template.json` descriptor.
//!
//! The project manifest is kept as an ordered JSON object so that fields the
//! merge does not touch come back out in the order `npm init` wrote them.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Tooling package every generated project depends on, and its version.
pub const TOOLING_DEPENDENCY: (&str, &str) = ("universal-scripts", "latest");

/// Value written to `engines.node`.
pub const NODE_ENGINE: &str = ">=18";

/// Script table every project starts from; template scripts override it.
pub const DEFAULT_SCRIPTS: [(&str, &str); 6] = [
    ("start", "universal-scripts start"),
    ("build", "universal-scripts build"),
    ("test", "universal-scripts test"),
    ("serve", "node build/server/server.js"),
    ("lint", "eslint src"),
    ("heroku-postbuild", "npm run build"),
];

/// A `name@version` pair handed to the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    fn from_table(table: &Map<String, Value>) -> Vec<Self> {
        table
            .iter()
            .map(|(name, version)| {
                let version = match version {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Self::new(name.clone(), version)
            })
            .collect()
    }
}

/// Parsed `template.json` shipped next to a template's `template/` folder.
///
/// Every level is optional; missing tables behave as empty ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateDescriptor {
    #[serde(default)]
    package: Option<PackageFragment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageFragment {
    #[serde(default)]
    scripts: Option<Map<String, Value>>,
    #[serde(default)]
    dependencies: Option<Map<String, Value>>,
    #[serde(default)]
    dev_dependencies: Option<Map<String, Value>>,
}

impl TemplateDescriptor {
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        serde_json::from_value(value).map_err(|e| DomainError::InvalidDescriptor(e.to_string()))
    }

    fn table(
        &self,
        pick: impl Fn(&PackageFragment) -> Option<&Map<String, Value>>,
    ) -> Map<String, Value> {
        self.package
            .as_ref()
            .and_then(pick)
            .cloned()
            .unwrap_or_default()
    }

    /// Scripts declared by the template.
    pub fn scripts(&self) -> Map<String, Value> {
        self.table(|p| p.scripts.as_ref())
    }

    /// Template dependencies plus [`TOOLING_DEPENDENCY`], which wins on a
    /// name collision.
    pub fn runtime_dependencies(&self) -> Vec<Dependency> {
        let mut table = self.table(|p| p.dependencies.as_ref());
        let (name, version) = TOOLING_DEPENDENCY;
        table.insert(name.to_owned(), Value::String(version.to_owned()));
        Dependency::from_table(&table)
    }

    pub fn dev_dependencies(&self) -> Vec<Dependency> {
        Dependency::from_table(&self.table(|p| p.dev_dependencies.as_ref()))
    }
}

/// The generated project's `package.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectManifest {
    fields: Map<String, Value>,
}

impl ProjectManifest {
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(DomainError::ManifestNotObject),
        }
    }

    /// Apply the template: default scripts overlaid by the template's,
    /// the node engine constraint, `private`, and no `main`.
    pub fn apply_template(&mut self, descriptor: &TemplateDescriptor) {
        let mut scripts: Map<String, Value> = DEFAULT_SCRIPTS
            .iter()
            .map(|(name, cmd)| ((*name).to_owned(), Value::String((*cmd).to_owned())))
            .collect();
        scripts.extend(descriptor.scripts());

        let mut engines = Map::new();
        engines.insert("node".into(), Value::String(NODE_ENGINE.into()));

        self.fields.insert("scripts".into(), Value::Object(scripts));
        self.fields.insert("engines".into(), Value::Object(engines));
        self.fields.insert("private".into(), Value::Bool(true));
        // shift_remove keeps the remaining keys in place.
        self.fields.shift_remove("main");
    }

    /// Pretty-printed with two-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        let mut out = serde_json::to_string_pretty(&self.fields)
            .map_err(|e| DomainError::ManifestSerialization(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}
