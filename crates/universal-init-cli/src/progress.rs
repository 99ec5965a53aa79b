//! Terminal rendering of scaffold progress.

use std::io::IsTerminal as _;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use universal_init_core::application::{ProgressSink, ScaffoldEvent};

use crate::output::OutputManager;

/// Prints one line per phase and keeps a spinner running while the package
/// manager works.
pub struct ConsoleProgress {
    output: OutputManager,
    spinner: Mutex<Option<ProgressBar>>,
    animate: bool,
}

impl ConsoleProgress {
    pub fn new(output: OutputManager) -> Self {
        let animate = !output.is_quiet() && std::io::stderr().is_terminal();
        Self {
            output,
            spinner: Mutex::new(None),
            animate,
        }
    }

    fn start_spinner(&self, msg: &str) {
        if !self.animate {
            return;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(msg.to_owned());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn line(&self, icon: &str, msg: &str) {
        self.stop_spinner();
        if let Err(e) = self.output.step(icon, msg) {
            debug!(error = %e, "failed to write progress line");
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn event(&self, event: &ScaffoldEvent) {
        match event {
            ScaffoldEvent::PackageManagerSelected {
                package_manager,
                detected,
            } => {
                let how = if *detected { "detected" } else { "selected" };
                self.line("\u{1f527}", &format!("Using {package_manager} ({how})"));
            }
            ScaffoldEvent::CreatingDirectory { path } => {
                debug!(path = %path.display(), "creating project directory");
            }
            ScaffoldEvent::InstallingTemplate { template } => {
                self.line("\u{1f4e5}", &format!("Installing template {template}..."));
            }
            ScaffoldEvent::CopyingFiles => self.line("\u{1f4c2}", "Copying template files..."),
            // Collected in the report and printed once the run is over.
            ScaffoldEvent::RenameFailed { .. } => {}
            ScaffoldEvent::MergingManifest => self.line("\u{1f4dd}", "Updating package.json..."),
            ScaffoldEvent::InstallingDependencies { count } => {
                self.line(
                    "\u{1f4e5}",
                    &format!("Installing dependencies ({count})..."),
                );
            }
            ScaffoldEvent::SkippedDependencies => self.line(
                "\u{1f539}",
                "Template has no dependencies; skipping install...",
            ),
            ScaffoldEvent::InstallingDevDependencies { count } => {
                self.line(
                    "\u{1f4e5}",
                    &format!("Installing dev dependencies ({count})..."),
                );
            }
            ScaffoldEvent::SkippedDevDependencies => self.line(
                "\u{1f539}",
                "Template has no dev dependencies; skipping install...",
            ),
            ScaffoldEvent::RemovingTemplate { template } => {
                self.line(
                    "\u{1f9f9}",
                    &format!("Removing template dependency {}...", template.name()),
                );
            }
            ScaffoldEvent::Finished => self.stop_spinner(),
        }

        if event.is_blocking() {
            self.start_spinner("waiting for the package manager");
        }
    }
}

impl Drop for ConsoleProgress {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;
    use crate::config::AppConfig;
    use universal_init_core::domain::TemplatePackage;

    fn quiet_progress() -> ConsoleProgress {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
        };
        ConsoleProgress::new(OutputManager::new(&args, &AppConfig::default()))
    }

    #[test]
    fn quiet_mode_never_animates() {
        let progress = quiet_progress();
        assert!(!progress.animate);

        progress.event(&ScaffoldEvent::InstallingTemplate {
            template: TemplatePackage::parse("cra-template-universal").unwrap(),
        });
        assert!(progress.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn finished_clears_any_spinner() {
        let progress = quiet_progress();
        progress.event(&ScaffoldEvent::InstallingDependencies { count: 2 });
        progress.event(&ScaffoldEvent::Finished);
        assert!(progress.spinner.lock().unwrap().is_none());
    }
}
