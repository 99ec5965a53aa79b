//! Scaffold Service - main application orchestrator.
//!
//! Runs the scaffold phases strictly in order:
//! 1. Pick the package manager (explicit or probed once)
//! 2. Create the project directory
//! 3. `npm init -y` and install the template package
//! 4. Copy `template/` into the project and rename dotfile templates
//! 5. Merge scripts/engines into `package.json`
//! 6. Install the template's dependencies and remove the template package
//!
//! There is no rollback: a failure leaves whatever was already written in
//! place.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, ScaffoldEvent,
        ports::{CommandRunner, Filesystem, ManifestLoader, NoProgress, ProgressSink},
    },
    domain::{
        CommandLine, Dependency, PackageManager, ProjectLayout, ProjectManifest,
        TemplateDescriptor, TemplatePackage,
    },
    error::{InitError, InitResult},
};

/// What to scaffold and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_root: PathBuf,
    pub template: TemplatePackage,
    /// Skip detection and use this flavor.
    pub package_manager: Option<PackageManager>,
}

impl ScaffoldRequest {
    pub fn new(project_root: impl Into<PathBuf>, template: TemplatePackage) -> Self {
        Self {
            project_root: project_root.into(),
            template,
            package_manager: None,
        }
    }

    pub fn with_package_manager(mut self, package_manager: Option<PackageManager>) -> Self {
        self.package_manager = package_manager;
        self
    }
}

/// A dotfile template that could not be renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of the copy + rename phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeOutcome {
    pub files_copied: usize,
    pub renamed: Vec<PathBuf>,
    pub rename_failures: Vec<RenameFailure>,
}

/// Summary of a finished scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_root: PathBuf,
    pub template: TemplatePackage,
    pub package_manager: PackageManager,
    pub files_copied: usize,
    pub renamed: Vec<PathBuf>,
    /// Non-fatal; surfaced to the operator at the end of the run.
    pub rename_failures: Vec<RenameFailure>,
    pub dependencies_installed: usize,
    pub dev_dependencies_installed: usize,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    loader: Box<dyn ManifestLoader>,
    progress: Box<dyn ProgressSink>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
        loader: Box<dyn ManifestLoader>,
    ) -> Self {
        Self {
            runner,
            filesystem,
            loader,
            progress: Box::new(NoProgress),
        }
    }

    /// Route phase notifications to `progress`.
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Fail with [`ApplicationError::ProjectExists`] if `root` is taken.
    ///
    /// Callers run this before prompting so nothing is asked of the operator
    /// for a run that cannot succeed.
    pub fn ensure_target_absent(&self, root: &Path) -> InitResult<()> {
        if self.filesystem.exists(root) {
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// Yarn if `yarn --version` succeeds, npm otherwise.
    #[instrument(skip_all)]
    pub fn detect_package_manager(&self) -> PackageManager {
        let yarn = self.runner.probe(&PackageManager::probe());
        let package_manager = PackageManager::from_probe(yarn);
        debug!(%package_manager, "Package manager detected");
        package_manager
    }

    /// Scaffold a new project.
    #[instrument(
        skip_all,
        fields(
            template = %request.template,
            project = %request.project_root.display()
        )
    )]
    pub fn scaffold(&self, request: ScaffoldRequest) -> InitResult<ScaffoldReport> {
        let ScaffoldRequest {
            project_root,
            template,
            package_manager,
        } = request;

        let (package_manager, detected) = match package_manager {
            Some(pm) => (pm, false),
            None => (self.detect_package_manager(), true),
        };
        self.emit(ScaffoldEvent::PackageManagerSelected {
            package_manager,
            detected,
        });

        let layout = ProjectLayout::new(project_root);

        self.emit(ScaffoldEvent::CreatingDirectory {
            path: layout.root().to_path_buf(),
        });
        self.filesystem.create_dir_all(layout.root())?;

        self.fetch_template(package_manager, &layout, &template)?;
        let materialized = self.materialize(&layout, &template)?;
        let descriptor = self.merge_manifest(&layout, &template)?;
        let (dependencies_installed, dev_dependencies_installed) =
            self.install_dependencies(package_manager, &layout, &descriptor)?;
        self.remove_template(package_manager, &layout, &template)?;

        self.emit(ScaffoldEvent::Finished);
        info!(
            files = materialized.files_copied,
            dependencies = dependencies_installed,
            dev_dependencies = dev_dependencies_installed,
            "Scaffold completed"
        );

        Ok(ScaffoldReport {
            project_root: layout.root().to_path_buf(),
            template,
            package_manager,
            files_copied: materialized.files_copied,
            renamed: materialized.renamed,
            rename_failures: materialized.rename_failures,
            dependencies_installed,
            dev_dependencies_installed,
        })
    }

    /// `npm init -y`, then install the template package. Both are fatal on
    /// failure.
    #[instrument(skip_all, fields(template = %template))]
    pub fn fetch_template(
        &self,
        package_manager: PackageManager,
        layout: &ProjectLayout,
        template: &TemplatePackage,
    ) -> InitResult<()> {
        self.emit(ScaffoldEvent::InstallingTemplate {
            template: template.clone(),
        });

        let as_install_error = |e: InitError| -> InitError {
            ApplicationError::TemplateInstall {
                template: template.to_string(),
                reason: e.to_string(),
            }
            .into()
        };

        self.runner
            .run(&PackageManager::init_command(), layout.root())
            .map_err(as_install_error)?;
        self.runner
            .run(
                &package_manager.install([template.install_spec()]),
                layout.root(),
            )
            .map_err(as_install_error)?;

        info!("Template installed");
        Ok(())
    }

    /// Copy the template's file tree into the project root, then rename the
    /// dotfile templates. Rename failures are collected, not raised.
    #[instrument(skip_all, fields(template = %template))]
    pub fn materialize(
        &self,
        layout: &ProjectLayout,
        template: &TemplatePackage,
    ) -> InitResult<MaterializeOutcome> {
        self.emit(ScaffoldEvent::CopyingFiles);

        let files_copied = self
            .filesystem
            .copy_tree(&layout.template_files_dir(template), layout.root())?;
        debug!(files_copied, "Template files copied");

        let mut outcome = MaterializeOutcome {
            files_copied,
            ..MaterializeOutcome::default()
        };

        for rename in layout.dotfile_renames() {
            if !self.filesystem.exists(&rename.from) {
                continue;
            }
            match self.filesystem.rename(&rename.from, &rename.to) {
                Ok(()) => outcome.renamed.push(rename.to),
                Err(e) => {
                    info!(path = %rename.from.display(), error = %e, "Dotfile rename failed");
                    let failure = RenameFailure {
                        path: rename.from,
                        reason: e.to_string(),
                    };
                    self.emit(ScaffoldEvent::RenameFailed {
                        path: failure.path.clone(),
                        reason: failure.reason.clone(),
                    });
                    outcome.rename_failures.push(failure);
                }
            }
        }

        Ok(outcome)
    }

    /// Rewrite `package.json` with the template's scripts and the fixed
    /// fields. Returns the template descriptor for the install phase.
    #[instrument(skip_all, fields(template = %template))]
    pub fn merge_manifest(
        &self,
        layout: &ProjectLayout,
        template: &TemplatePackage,
    ) -> InitResult<TemplateDescriptor> {
        self.emit(ScaffoldEvent::MergingManifest);

        let descriptor = TemplateDescriptor::from_value(
            self.loader.load(&layout.template_descriptor_path(template))?,
        )?;

        let manifest_path = layout.manifest_path();
        let mut manifest = ProjectManifest::from_value(self.loader.load(&manifest_path)?)?;
        manifest.apply_template(&descriptor);

        self.filesystem
            .write_file(&manifest_path, &manifest.to_json_pretty()?)?;
        debug!(path = %manifest_path.display(), "Manifest written");

        Ok(descriptor)
    }

    /// Install runtime then dev dependencies, one invocation per non-empty
    /// list. Returns how many of each were requested.
    #[instrument(skip_all, fields(%package_manager))]
    pub fn install_dependencies(
        &self,
        package_manager: PackageManager,
        layout: &ProjectLayout,
        descriptor: &TemplateDescriptor,
    ) -> InitResult<(usize, usize)> {
        let runtime = descriptor.runtime_dependencies();
        if runtime.is_empty() {
            info!("Template has no dependencies; skipping install");
            self.emit(ScaffoldEvent::SkippedDependencies);
        } else {
            self.emit(ScaffoldEvent::InstallingDependencies {
                count: runtime.len(),
            });
            let command = package_manager.install(runtime.iter().map(Dependency::spec));
            self.run_install(&command, layout)?;
        }

        let dev = descriptor.dev_dependencies();
        if dev.is_empty() {
            info!("Template has no dev dependencies; skipping install");
            self.emit(ScaffoldEvent::SkippedDevDependencies);
        } else {
            self.emit(ScaffoldEvent::InstallingDevDependencies { count: dev.len() });
            let command = package_manager.install_dev(dev.iter().map(Dependency::spec));
            self.run_install(&command, layout)?;
        }

        Ok((runtime.len(), dev.len()))
    }

    /// Uninstall the template package; it was only a delivery vehicle.
    #[instrument(skip_all, fields(template = %template))]
    pub fn remove_template(
        &self,
        package_manager: PackageManager,
        layout: &ProjectLayout,
        template: &TemplatePackage,
    ) -> InitResult<()> {
        self.emit(ScaffoldEvent::RemovingTemplate {
            template: template.clone(),
        });

        self.runner
            .run(&package_manager.remove([template.name()]), layout.root())
            .map_err(|e| {
                ApplicationError::TemplateRemoval {
                    template: template.name().to_owned(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run_install(&self, command: &CommandLine, layout: &ProjectLayout) -> InitResult<()> {
        self.runner.run(command, layout.root()).map_err(|e| {
            ApplicationError::DependencyInstall {
                command: command.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn emit(&self, event: ScaffoldEvent) {
        self.progress.event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCommandRunner, MockFilesystem, MockManifestLoader};
    use mockall::Sequence;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    const ROOT: &str = "/work/my-app";

    fn ts_template() -> TemplatePackage {
        TemplatePackage::parse("cra-template-universal-ts").unwrap()
    }

    fn is(expected: &'static str) -> impl Fn(&CommandLine, &Path) -> bool {
        move |cmd, cwd| cmd.to_string() == expected && cwd == Path::new(ROOT)
    }

    /// Collects events for assertions.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<ScaffoldEvent>>>);

    impl ProgressSink for Recorder {
        fn event(&self, event: &ScaffoldEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn loader_with(descriptor: serde_json::Value) -> MockManifestLoader {
        let mut loader = MockManifestLoader::new();
        loader
            .expect_load()
            .withf(|p| p.ends_with("template.json"))
            .returning(move |_| Ok(descriptor.clone()));
        loader
            .expect_load()
            .withf(|p| p == Path::new(ROOT).join("package.json"))
            .returning(|_| {
                Ok(json!({
                    "name": "my-app",
                    "version": "1.0.0",
                    "main": "index.js",
                    "scripts": { "test": "exit 1" }
                }))
            });
        loader
    }

    fn quiet_filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_copy_tree().returning(|_, _| Ok(3));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    #[test]
    fn existing_target_is_rejected_without_side_effects() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p == Path::new(ROOT))
            .returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let service = ScaffoldService::new(
            Box::new(MockCommandRunner::new()),
            Box::new(fs),
            Box::new(MockManifestLoader::new()),
        );

        let err = service.ensure_target_absent(Path::new(ROOT)).unwrap_err();
        assert!(matches!(
            err,
            InitError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn detection_probes_yarn_once() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_probe()
            .withf(|cmd| cmd.to_string() == "yarn --version")
            .times(1)
            .return_const(false);

        let service = ScaffoldService::new(
            Box::new(runner),
            Box::new(MockFilesystem::new()),
            Box::new(MockManifestLoader::new()),
        );
        assert_eq!(service.detect_package_manager(), PackageManager::Npm);
    }

    #[test]
    fn full_run_issues_commands_in_order() {
        let mut seq = Sequence::new();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_probe()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        for expected in [
            "npm init -y",
            "yarn add cra-template-universal-ts",
            "yarn add react@^18.2.0 universal-scripts@latest",
            "yarn add -D typescript@^5.4.0",
            "yarn remove cra-template-universal-ts",
        ] {
            runner
                .expect_run()
                .withf(is(expected))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }

        let loader = loader_with(json!({
            "package": {
                "dependencies": { "react": "^18.2.0" },
                "devDependencies": { "typescript": "^5.4.0" }
            }
        }));

        let service =
            ScaffoldService::new(Box::new(runner), Box::new(quiet_filesystem()), Box::new(loader));
        let report = service
            .scaffold(ScaffoldRequest::new(ROOT, ts_template()))
            .unwrap();

        assert_eq!(report.package_manager, PackageManager::Yarn);
        assert_eq!(report.files_copied, 3);
        assert_eq!(report.dependencies_installed, 2);
        assert_eq!(report.dev_dependencies_installed, 1);
        assert!(report.rename_failures.is_empty());
    }

    #[test]
    fn explicit_package_manager_skips_the_probe() {
        let mut runner = MockCommandRunner::new();
        runner.expect_probe().never();
        runner.expect_run().returning(|_, _| Ok(()));

        let service = ScaffoldService::new(
            Box::new(runner),
            Box::new(quiet_filesystem()),
            Box::new(loader_with(json!({}))),
        );
        let report = service
            .scaffold(
                ScaffoldRequest::new(ROOT, ts_template())
                    .with_package_manager(Some(PackageManager::Npm)),
            )
            .unwrap();
        assert_eq!(report.package_manager, PackageManager::Npm);
    }

    #[test]
    fn template_install_failure_is_fatal() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().withf(is("npm init -y")).returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(is("npm install --save no-such-template"))
            .returning(|cmd, _| {
                Err(ApplicationError::CommandFailed {
                    command: cmd.to_string(),
                    reason: "exit status 1".into(),
                }
                .into())
            });

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_copy_tree().never();
        fs.expect_write_file().never();

        let service = ScaffoldService::new(
            Box::new(runner),
            Box::new(fs),
            Box::new(MockManifestLoader::new()),
        );
        let err = service
            .scaffold(
                ScaffoldRequest::new(ROOT, TemplatePackage::parse("no-such-template").unwrap())
                    .with_package_manager(Some(PackageManager::Npm)),
            )
            .unwrap_err();

        match err {
            InitError::Application(ApplicationError::TemplateInstall { template, reason }) => {
                assert_eq!(template, "no-such-template");
                assert!(reason.contains("exit status 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn versioned_template_installs_with_version_but_removes_by_name() {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&commands);
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |cmd, _| {
            seen.lock().unwrap().push(cmd.to_string());
            Ok(())
        });

        let service = ScaffoldService::new(
            Box::new(runner),
            Box::new(quiet_filesystem()),
            Box::new(MockManifestLoader::new()),
        );
        let layout = ProjectLayout::new(ROOT);
        let template = TemplatePackage::parse("my-template@2.1.0").unwrap();

        service
            .fetch_template(PackageManager::Npm, &layout, &template)
            .unwrap();
        service
            .remove_template(PackageManager::Npm, &layout, &template)
            .unwrap();

        assert_eq!(
            *commands.lock().unwrap(),
            [
                "npm init -y",
                "npm install --save my-template@2.1.0",
                "npm uninstall my-template"
            ]
        );
    }

    #[test]
    fn dotfiles_present_are_renamed_and_missing_ones_skipped() {
        let mut fs = MockFilesystem::new();
        fs.expect_copy_tree()
            .withf(|from, to| {
                from == Path::new(ROOT).join("node_modules/cra-template-universal-ts/template")
                    && to == Path::new(ROOT)
            })
            .returning(|_, _| Ok(10));
        fs.expect_exists()
            .returning(|p| p.ends_with("gitignore") || p.ends_with("eslintrc"));
        fs.expect_rename()
            .withf(|from, _| from.ends_with("gitignore"))
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .withf(|from, _| from.ends_with("eslintrc"))
            .returning(|from, _| {
                Err(ApplicationError::FilesystemError {
                    path: from.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            });

        let recorder = Recorder::default();
        let service = ScaffoldService::new(
            Box::new(MockCommandRunner::new()),
            Box::new(fs),
            Box::new(MockManifestLoader::new()),
        )
        .with_progress(Box::new(recorder.clone()));

        let outcome = service
            .materialize(&ProjectLayout::new(ROOT), &ts_template())
            .unwrap();

        assert_eq!(outcome.files_copied, 10);
        assert_eq!(outcome.renamed, [Path::new(ROOT).join(".gitignore")]);
        assert_eq!(outcome.rename_failures.len(), 1);
        assert_eq!(outcome.rename_failures[0].path, Path::new(ROOT).join("eslintrc"));
        assert!(outcome.rename_failures[0].reason.contains("permission denied"));

        // One notification per failure; the CLI prints it once at the end.
        let events = recorder.0.lock().unwrap();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ScaffoldEvent::RenameFailed { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn merged_manifest_is_written_whole() {
        let written = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&written);

        let mut fs = MockFilesystem::new();
        fs.expect_write_file()
            .withf(|p, _| p == Path::new(ROOT).join("package.json"))
            .times(1)
            .returning(move |_, content| {
                *sink.lock().unwrap() = content.to_owned();
                Ok(())
            });

        let loader = loader_with(json!({
            "package": { "scripts": { "start": "custom start" } }
        }));
        let service = ScaffoldService::new(
            Box::new(MockCommandRunner::new()),
            Box::new(fs),
            Box::new(loader),
        );
        service
            .merge_manifest(&ProjectLayout::new(ROOT), &ts_template())
            .unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&written.lock().unwrap()).unwrap();
        assert_eq!(manifest["scripts"]["start"], "custom start");
        assert_eq!(manifest["scripts"]["build"], "universal-scripts build");
        assert_eq!(manifest["engines"]["node"], ">=18");
        assert_eq!(manifest["private"], true);
        assert!(manifest.get("main").is_none());
        assert_eq!(manifest["name"], "my-app");
    }

    #[test]
    fn empty_dev_dependencies_are_skipped() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(is("npm install --save universal-scripts@latest"))
            .times(1)
            .returning(|_, _| Ok(()));

        let recorder = Recorder::default();
        let service = ScaffoldService::new(
            Box::new(runner),
            Box::new(MockFilesystem::new()),
            Box::new(MockManifestLoader::new()),
        )
        .with_progress(Box::new(recorder.clone()));

        let counts = service
            .install_dependencies(
                PackageManager::Npm,
                &ProjectLayout::new(ROOT),
                &TemplateDescriptor::default(),
            )
            .unwrap();

        assert_eq!(counts, (1, 0));
        assert!(
            recorder
                .0
                .lock()
                .unwrap()
                .contains(&ScaffoldEvent::SkippedDevDependencies)
        );
    }

    #[test]
    fn dependency_install_failure_is_fatal() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|cmd, _| {
            Err(ApplicationError::CommandFailed {
                command: cmd.to_string(),
                reason: "network".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(
            Box::new(runner),
            Box::new(MockFilesystem::new()),
            Box::new(MockManifestLoader::new()),
        );
        let err = service
            .install_dependencies(
                PackageManager::Yarn,
                &ProjectLayout::new(ROOT),
                &TemplateDescriptor::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            InitError::Application(ApplicationError::DependencyInstall { .. })
        ));
    }
}
