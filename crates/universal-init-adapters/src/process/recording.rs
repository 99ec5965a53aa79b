//! Command runner that records instead of spawning, for tests.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use universal_init_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::CommandLine,
    error::InitResult,
};

/// Records every command it is asked to run.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the service under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    runs: Vec<(CommandLine, PathBuf)>,
    probes: Vec<CommandLine>,
    failing_prefixes: Vec<String>,
    probe_succeeds: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make probes succeed (yarn "installed").
    pub fn with_yarn(self) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.probe_succeeds = true;
        }
        self
    }

    /// Fail every run whose rendered command line starts with `prefix`.
    pub fn fail_on(self, prefix: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing_prefixes.push(prefix.into());
        }
        self
    }

    /// Rendered command lines of every run, in order.
    pub fn commands(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.runs.iter().map(|(c, _)| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Working directories of every run, in order.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.inner
            .lock()
            .map(|inner| inner.runs.iter().map(|(_, d)| d.clone()).collect())
            .unwrap_or_default()
    }

    pub fn probe_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.probes.len()).unwrap_or(0)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> InitResult<()> {
        let rendered = command.to_string();
        let mut inner = self.inner.lock().map_err(|_| ApplicationError::CommandFailed {
            command: rendered.clone(),
            reason: "recording runner lock poisoned".into(),
        })?;
        inner.runs.push((command.clone(), cwd.to_path_buf()));

        if inner
            .failing_prefixes
            .iter()
            .any(|prefix| rendered.starts_with(prefix.as_str()))
        {
            return Err(ApplicationError::CommandFailed {
                command: rendered,
                reason: "exit 1: scripted failure".into(),
            }
            .into());
        }
        Ok(())
    }

    fn probe(&self, command: &CommandLine) -> bool {
        match self.inner.lock() {
            Ok(mut inner) => {
                inner.probes.push(command.clone());
                inner.probe_succeeds
            }
            Err(_) => false,
        }
    }
}
