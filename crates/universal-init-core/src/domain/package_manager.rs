//! Package-manager flavors and the command lines derived from them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A program plus its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

/// Space-joined form, used for logs and error messages.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Which package manager drives the run.
///
/// Detected once (see [`PackageManager::probe`]) and then passed by value to
/// every phase that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    /// Version probe: yarn is used when this succeeds.
    pub fn probe() -> CommandLine {
        CommandLine::new("yarn").arg("--version")
    }

    /// Flavor implied by the outcome of [`PackageManager::probe`].
    pub fn from_probe(yarn_available: bool) -> Self {
        if yarn_available { Self::Yarn } else { Self::Npm }
    }

    /// Creates the initial `package.json`. Always npm, whichever flavor runs
    /// the rest of the install.
    pub fn init_command() -> CommandLine {
        CommandLine::new("npm").args(["init", "-y"])
    }

    pub fn program(self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Install as runtime dependencies.
    pub fn install<I, S>(self, packages: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base = match self {
            Self::Yarn => CommandLine::new("yarn").arg("add"),
            Self::Npm => CommandLine::new("npm").args(["install", "--save"]),
        };
        base.args(packages)
    }

    /// Install as dev dependencies.
    pub fn install_dev<I, S>(self, packages: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base = match self {
            Self::Yarn => CommandLine::new("yarn").args(["add", "-D"]),
            Self::Npm => CommandLine::new("npm").args(["install", "-D"]),
        };
        base.args(packages)
    }

    pub fn remove<I, S>(self, packages: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base = match self {
            Self::Yarn => CommandLine::new("yarn").arg("remove"),
            Self::Npm => CommandLine::new("npm").arg("uninstall"),
        };
        base.args(packages)
    }

    /// What the operator should type once the project exists.
    pub fn start_hint(self, project_name: &str) -> String {
        format!("cd {project_name} && {} start", self.program())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yarn" => Ok(Self::Yarn),
            "npm" => Ok(Self::Npm),
            other => Err(DomainError::UnknownPackageManager(other.to_owned())),
        }
    }
}
