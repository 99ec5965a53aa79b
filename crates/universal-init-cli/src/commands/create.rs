//! Implementation of the default mode: create a project.
//!
//! Responsibility: resolve the project directory, choose the template and
//! package manager, call the core scaffold service, and display results. No
//! business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use universal_init_adapters::{JsonFileLoader, LocalFilesystem, SystemRunner};
use universal_init_core::{
    application::{ScaffoldReport, ScaffoldRequest, ScaffoldService},
    domain::{PackageManager, TemplatePackage},
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    progress::ConsoleProgress,
};

/// What the operator asked for on the command line.
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub name: String,
    pub template: Option<String>,
    pub package_manager: Option<PackageManager>,
}

/// Execute the create flow.
///
/// Dispatch sequence:
/// 1. Validate the project name and resolve `<cwd>/<name>`
/// 2. Refuse an existing target before asking anything
/// 3. Pick the template (flag, config, or prompt)
/// 4. Run the scaffold via `ScaffoldService`
/// 5. Report rename problems and print next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: CreateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    validate_project_name(&args.name)?;
    let cwd = std::env::current_dir().with_cli_context(|| "reading the current directory")?;
    let project_root = project_root(&cwd, &args.name);

    output.header(&format!(
        "\u{1f680} Creating project in: {}",
        project_root.display()
    ))?;

    let service = ScaffoldService::new(
        Box::new(SystemRunner::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(JsonFileLoader::new()),
    )
    .with_progress(Box::new(ConsoleProgress::new(output.clone())));

    // 2. Existing directory: stop before prompting
    service.ensure_target_absent(&project_root)?;

    // 3. Template
    let template = choose_template(args.template.as_deref(), config, output)?;
    output.step("\u{1f4e6}", &format!("Using template: {template}"))?;

    let package_manager = match args.package_manager {
        Some(pm) => Some(pm),
        None => config
            .default_package_manager()
            .map_err(|e| CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            })?,
    };
    debug!(?package_manager, "Package manager preference");

    // 4. Scaffold
    info!(path = %project_root.display(), "Scaffold started");
    let report = service.scaffold(
        ScaffoldRequest::new(&project_root, template).with_package_manager(package_manager),
    )?;

    // 5. Results
    print_summary(&report, &args.name, global, output)?;
    Ok(())
}

/// Flag first, then `defaults.template`, then the interactive prompt.
fn choose_template(
    flag: Option<&str>,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<TemplatePackage> {
    if let Some(id) = flag {
        return Ok(TemplatePackage::resolve(id)?);
    }

    let configured = config
        .default_template()
        .map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?;
    if let Some(template) = configured {
        debug!(%template, "Template taken from configuration");
        return Ok(template);
    }

    prompt_for_template(output)
}

#[cfg(feature = "interactive")]
fn prompt_for_template(output: &OutputManager) -> CliResult<TemplatePackage> {
    use crate::prompt::DialoguerPrompter;
    use universal_init_core::application::select_template;

    let prompter = DialoguerPrompter::new(output.supports_color());
    Ok(select_template(&prompter)?)
}

#[cfg(not(feature = "interactive"))]
fn prompt_for_template(_output: &OutputManager) -> CliResult<TemplatePackage> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

fn print_summary(
    report: &ScaffoldReport,
    name: &str,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<()> {
    for failure in &report.rename_failures {
        output.warning(&format!(
            "Could not rename {}: {}",
            display_name(&failure.path),
            failure.reason
        ))?;
    }

    info!(
        files = report.files_copied,
        renamed = report.renamed.len(),
        "Project ready"
    );

    output.success("Init completed. Now you might want to run:")?;
    output.command_hint(&report.package_manager.start_hint(name))?;

    if global.verbose > 0 {
        output.print(&format!(
            "  ({} files copied, {} dependencies, {} dev dependencies)",
            report.files_copied, report.dependencies_installed, report.dev_dependencies_installed
        ))?;
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Name validation ───────────────────────────────────────────────────────────

/// The name becomes a single directory under the current one.
pub fn validate_project_name(name: &str) -> CliResult<()> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty")
    } else if name.starts_with('.') {
        Some("name cannot start with '.'")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

/// `<cwd>/<name>`.
pub fn project_root(cwd: &Path, name: &str) -> PathBuf {
    cwd.join(name)
}
