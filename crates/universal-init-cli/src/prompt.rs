//! Interactive template prompts backed by `dialoguer`.

use std::io;

use console::Term;
use dialoguer::{
    Input, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};

use universal_init_core::{
    application::{ApplicationError, ports::TemplatePrompter},
    domain::TemplateChoice,
    error::{InitError, InitResult},
};

/// Asks on the controlling terminal.
pub struct DialoguerPrompter {
    theme: Box<dyn Theme>,
}

impl DialoguerPrompter {
    pub fn new(color: bool) -> Self {
        let theme: Box<dyn Theme> = if color {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self { theme }
    }
}

impl TemplatePrompter for DialoguerPrompter {
    fn select_template(&self, choices: &[TemplateChoice]) -> InitResult<TemplateChoice> {
        let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();

        let selection = Select::with_theme(self.theme.as_ref())
            .with_prompt("Select a template")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;

        selection
            .and_then(|index| choices.get(index).copied())
            .ok_or_else(|| ApplicationError::PromptCancelled.into())
    }

    fn custom_template(&self) -> InitResult<String> {
        Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt("Enter the name of the custom template")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Template name cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(prompt_error)
    }

    fn reject(&self, reason: &str) {
        let _ = Term::stderr().write_line(&format!("\u{2757} {reason}"));
    }
}

fn prompt_error(err: dialoguer::Error) -> InitError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
            ApplicationError::PromptCancelled.into()
        }
        other => ApplicationError::PromptFailed {
            reason: other.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_io_is_a_cancellation() {
        let err = prompt_error(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::Interrupted,
            "ctrl-c",
        )));
        assert!(matches!(
            err,
            InitError::Application(ApplicationError::PromptCancelled)
        ));
    }

    #[test]
    fn other_io_errors_are_prompt_failures() {
        let err = prompt_error(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::NotConnected,
            "not a terminal",
        )));
        assert!(matches!(
            err,
            InitError::Application(ApplicationError::PromptFailed { .. })
        ));
    }
}
