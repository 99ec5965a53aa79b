//! Template selection and template package identifiers.

use std::{fmt, str::FromStr};

use crate::domain::DomainError;

/// npm package behind the "Typescript" choice.
pub const TYPESCRIPT_TEMPLATE: &str = "cra-template-universal-ts";

/// npm package behind the "Default JS" choice.
pub const JAVASCRIPT_TEMPLATE: &str = "cra-template-universal";

/// The entries of the template selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateChoice {
    TypeScript,
    DefaultJs,
    /// The operator types a package identifier by hand.
    Custom,
}

impl TemplateChoice {
    /// All choices, in prompt order.
    pub const ALL: [TemplateChoice; 3] = [Self::TypeScript, Self::DefaultJs, Self::Custom];

    /// Label shown in the selection list.
    pub fn label(self) -> &'static str {
        match self {
            Self::TypeScript => "Typescript",
            Self::DefaultJs => "Default JS",
            Self::Custom => "Custom Template (Enter Manually)",
        }
    }

    /// Package name for built-in choices; `None` for [`TemplateChoice::Custom`].
    pub fn package_name(self) -> Option<&'static str> {
        match self {
            Self::TypeScript => Some(TYPESCRIPT_TEMPLATE),
            Self::DefaultJs => Some(JAVASCRIPT_TEMPLATE),
            Self::Custom => None,
        }
    }

    /// Short command-line aliases for the built-in templates.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Some(Self::TypeScript),
            "javascript" | "js" | "default" => Some(Self::DefaultJs),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A template package as handed to the package manager.
///
/// `name` is what ends up under `node_modules/`; `version` is only used for
/// the install command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplatePackage {
    name: String,
    version: Option<String>,
}

impl TemplatePackage {
    /// Parse `name`, `name@version`, `@scope/name` or `@scope/name@version`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTemplateName);
        }

        let invalid = |reason: &str| DomainError::InvalidTemplateName {
            input: trimmed.to_owned(),
            reason: reason.to_owned(),
        };

        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid("contains whitespace"));
        }

        // Skip a leading scope marker when looking for the version separator.
        let search_from = usize::from(trimmed.starts_with('@'));
        let (name, version) = match trimmed[search_from..].find('@') {
            Some(at) => {
                let at = at + search_from;
                (&trimmed[..at], Some(&trimmed[at + 1..]))
            }
            None => (trimmed, None),
        };

        if name.is_empty() || name == "@" {
            return Err(invalid("missing package name"));
        }
        if name.starts_with('@') && !name.contains('/') {
            return Err(invalid("scoped packages must look like @scope/name"));
        }
        if name.ends_with('/') {
            return Err(invalid("missing package name after scope"));
        }
        if matches!(version, Some("")) {
            return Err(invalid("missing version after '@'"));
        }

        Ok(Self {
            name: name.to_owned(),
            version: version.map(str::to_owned),
        })
    }

    /// Package for a built-in choice, `None` for the custom entry.
    pub fn builtin(choice: TemplateChoice) -> Option<Self> {
        choice.package_name().map(|name| Self {
            name: name.to_owned(),
            version: None,
        })
    }

    /// Resolve a command-line value: aliases first, then a package identifier.
    pub fn resolve(input: &str) -> Result<Self, DomainError> {
        match TemplateChoice::from_alias(input).and_then(Self::builtin) {
            Some(package) => Ok(package),
            None => Self::parse(input),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Token passed to `install`: `name` or `name@version`.
    pub fn install_spec(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TemplatePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.install_spec())
    }
}

impl FromStr for TemplatePackage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_are_listed_in_prompt_order() {
        let labels: Vec<_> = TemplateChoice::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            ["Typescript", "Default JS", "Custom Template (Enter Manually)"]
        );
    }

    #[test]
    fn builtin_choices_map_to_packages() {
        assert_eq!(
            TemplatePackage::builtin(TemplateChoice::TypeScript)
                .unwrap()
                .name(),
            "cra-template-universal-ts"
        );
        assert_eq!(
            TemplatePackage::builtin(TemplateChoice::DefaultJs)
                .unwrap()
                .name(),
            "cra-template-universal"
        );
        assert!(TemplatePackage::builtin(TemplateChoice::Custom).is_none());
    }

    #[test]
    fn plain_name_has_no_version() {
        let pkg = TemplatePackage::parse("my-template").unwrap();
        assert_eq!(pkg.name(), "my-template");
        assert_eq!(pkg.version(), None);
        assert_eq!(pkg.install_spec(), "my-template");
    }

    #[test]
    fn version_suffix_is_split_off() {
        let pkg = TemplatePackage::parse("my-template@1.2.3").unwrap();
        assert_eq!(pkg.name(), "my-template");
        assert_eq!(pkg.version(), Some("1.2.3"));
        assert_eq!(pkg.to_string(), "my-template@1.2.3");
    }

    #[test]
    fn scoped_names_keep_their_scope() {
        let pkg = TemplatePackage::parse("@acme/template").unwrap();
        assert_eq!(pkg.name(), "@acme/template");
        assert_eq!(pkg.version(), None);

        let pkg = TemplatePackage::parse("@acme/template@next").unwrap();
        assert_eq!(pkg.name(), "@acme/template");
        assert_eq!(pkg.version(), Some("next"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let pkg = TemplatePackage::parse("  my-template \n").unwrap();
        assert_eq!(pkg.name(), "my-template");
    }

    #[test]
    fn empty_and_blank_inputs_are_rejected() {
        assert_eq!(
            TemplatePackage::parse(""),
            Err(DomainError::EmptyTemplateName)
        );
        assert_eq!(
            TemplatePackage::parse("   "),
            Err(DomainError::EmptyTemplateName)
        );
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        for input in ["@", "@acme", "@acme/", "my template", "pkg@", "@1.0"] {
            assert!(
                matches!(
                    TemplatePackage::parse(input),
                    Err(DomainError::InvalidTemplateName { .. })
                ),
                "accepted: {input}"
            );
        }
    }

    #[test]
    fn resolve_accepts_aliases() {
        assert_eq!(
            TemplatePackage::resolve("ts").unwrap().name(),
            TYPESCRIPT_TEMPLATE
        );
        assert_eq!(
            TemplatePackage::resolve("JS").unwrap().name(),
            JAVASCRIPT_TEMPLATE
        );
        assert_eq!(
            TemplatePackage::resolve("cra-template-foo").unwrap().name(),
            "cra-template-foo"
        );
    }
}
