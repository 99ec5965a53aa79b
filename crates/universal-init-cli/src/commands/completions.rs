//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "universal-init";

pub fn execute(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    write_completions(shell, &mut cmd, &mut io::stdout());
    Ok(())
}

fn write_completions(shell: Shell, cmd: &mut clap::Command, out: &mut dyn io::Write) {
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, out),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, out),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, out),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, out),
        Shell::Elvish => generate(shells::Elvish, cmd, BIN_NAME, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut Cli::command(), &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_mentions_the_flags() {
        let script = render(Shell::Bash);
        assert!(script.contains("universal-init"));
        assert!(script.contains("--template"));
        assert!(script.contains("--package-manager"));
    }

    #[test]
    fn every_shell_renders() {
        for shell in [Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!render(shell).is_empty());
        }
    }
}
