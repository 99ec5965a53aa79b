//! Template selection use case.

use tracing::{debug, instrument};

use crate::{
    application::ports::TemplatePrompter,
    domain::{TemplateChoice, TemplatePackage},
    error::InitResult,
};

/// Ask the operator for a template.
///
/// Built-in choices resolve immediately. For the custom entry the identifier
/// prompt is repeated until it yields a valid package identifier; an empty
/// answer never gets through.
#[instrument(skip_all)]
pub fn select_template<P>(prompter: &P) -> InitResult<TemplatePackage>
where
    P: TemplatePrompter + ?Sized,
{
    let choice = prompter.select_template(&TemplateChoice::ALL)?;
    debug!(choice = %choice, "Template choice made");

    if let Some(package) = TemplatePackage::builtin(choice) {
        return Ok(package);
    }

    loop {
        let input = prompter.custom_template()?;
        match TemplatePackage::parse(&input) {
            Ok(package) => return Ok(package),
            Err(e) => {
                debug!(input = %input, error = %e, "Custom template rejected");
                prompter.reject(&e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockTemplatePrompter};
    use crate::domain::{JAVASCRIPT_TEMPLATE, TYPESCRIPT_TEMPLATE};
    use crate::error::InitError;
    use mockall::Sequence;

    fn choosing(choice: TemplateChoice) -> MockTemplatePrompter {
        let mut prompter = MockTemplatePrompter::new();
        prompter
            .expect_select_template()
            .times(1)
            .returning(move |_| Ok(choice));
        prompter
    }

    #[test]
    fn typescript_needs_no_second_prompt() {
        let mut prompter = choosing(TemplateChoice::TypeScript);
        prompter.expect_custom_template().never();

        let package = select_template(&prompter).unwrap();
        assert_eq!(package.name(), TYPESCRIPT_TEMPLATE);
    }

    #[test]
    fn default_js_maps_to_the_js_template() {
        let mut prompter = choosing(TemplateChoice::DefaultJs);
        prompter.expect_custom_template().never();

        assert_eq!(
            select_template(&prompter).unwrap().name(),
            JAVASCRIPT_TEMPLATE
        );
    }

    #[test]
    fn all_choices_are_offered() {
        let mut prompter = MockTemplatePrompter::new();
        prompter
            .expect_select_template()
            .withf(|choices| choices == TemplateChoice::ALL)
            .returning(|_| Ok(TemplateChoice::TypeScript));

        select_template(&prompter).unwrap();
    }

    #[test]
    fn empty_custom_answer_is_asked_again() {
        let mut seq = Sequence::new();
        let mut prompter = choosing(TemplateChoice::Custom);
        prompter
            .expect_custom_template()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(String::new()));
        prompter
            .expect_reject()
            .withf(|reason| reason == "Template name cannot be empty")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        prompter
            .expect_custom_template()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("   ".into()));
        prompter
            .expect_reject()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        prompter
            .expect_custom_template()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("my-template@1.0.0".into()));

        let package = select_template(&prompter).unwrap();
        assert_eq!(package.name(), "my-template");
        assert_eq!(package.version(), Some("1.0.0"));
    }

    #[test]
    fn cancellation_propagates() {
        let mut prompter = MockTemplatePrompter::new();
        prompter
            .expect_select_template()
            .returning(|_| Err(ApplicationError::PromptCancelled.into()));

        assert!(matches!(
            select_template(&prompter),
            Err(InitError::Application(ApplicationError::PromptCancelled))
        ));
    }
}
