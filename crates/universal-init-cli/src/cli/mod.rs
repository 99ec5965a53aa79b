//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Parser, ValueEnum};

use universal_init_core::domain::PackageManager;

pub mod global;
pub use global::GlobalArgs;

/// Directory name used when none is given.
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "universal-init",
    bin_name = "universal-init",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f680} Bootstrap a universal-scripts project from a template",
    long_about = "Creates ./NAME, installs the chosen template package, copies its \
                  files into the project, merges its scripts and dependencies into \
                  package.json, and removes the template package again.",
    after_help = "EXAMPLES:\n\
        \x20 universal-init                       # ./my-app, template chosen interactively\n\
        \x20 universal-init shop --template ts\n\
        \x20 universal-init blog --template my-template@2.0.0 --package-manager npm\n\
        \x20 universal-init --completions bash > ~/.local/share/bash-completion/completions/universal-init",
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Name of the project directory, created under the current directory.
    #[arg(value_name = "NAME", default_value = DEFAULT_PROJECT_NAME)]
    pub name: String,

    /// Skip the template prompt.
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        help = "Template to use: ts, js, or an npm package (name[@version])"
    )]
    pub template: Option<String>,

    /// Skip yarn detection.
    #[arg(
        short = 'p',
        long = "package-manager",
        value_name = "PM",
        value_enum,
        help = "Package manager to use instead of auto-detection"
    )]
    pub package_manager: Option<PackageManagerArg>,

    /// Print a completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        conflicts_with = "print_config",
        help = "Generate shell completions and exit"
    )]
    pub completions: Option<Shell>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config", help = "Print the effective configuration as TOML and exit")]
    pub print_config: bool,
}

/// Package manager override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
        }
    }
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
