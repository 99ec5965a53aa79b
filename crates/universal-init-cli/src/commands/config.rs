//! `--print-config`: show the effective configuration.

use std::io::Write as _;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Print the merged configuration as TOML on stdout, even in quiet mode.
pub fn execute(config: &AppConfig) -> CliResult<()> {
    let rendered = config.to_toml().map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: None,
    })?;

    std::io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .with_cli_context(|| "writing configuration to stdout")
}
