//! Launching the external build tool.
//!
//! One call, one subprocess, one result: the runner blocks until the tool
//! exits, captures stdout and stderr in full, and never retries. A launch
//! failure (executable missing or not runnable) is a [`LaunchError`]; a
//! tool that ran and exited non-zero is a normal [`InvocationResult`].

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use thiserror::Error;

use crate::core::version::ToolVersion;
use crate::util::config::ToolSettings;
use crate::util::process::{find_launcher, ProcessBuilder};

/// Default launcher executable name.
#[cfg(not(windows))]
pub const LAUNCHER_NAME: &str = "gradle";

/// Default launcher executable name.
#[cfg(windows)]
pub const LAUNCHER_NAME: &str = "gradle.bat";

/// Prefix of the version line in `--version` output.
const VERSION_LINE_PREFIX: &str = "Gradle ";

/// The external tool could not be started.
///
/// Distinct from a tool that launched and exited non-zero; that case is a
/// normal [`InvocationResult`].
#[derive(Debug, Error)]
#[error("failed to launch `{program}`")]
pub struct LaunchError {
    /// The executable that could not be started.
    pub program: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Captured output and exit status of one tool invocation.
///
/// Immutable once produced; consumed by outcome classification and then
/// discarded.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

impl InvocationResult {
    /// Whether the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout and stderr concatenated, for marker searches.
    pub fn combined_output(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        combined.push_str(&self.stdout);
        if !self.stdout.ends_with('\n') && !self.stdout.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

/// Handle on a resolved build-tool launcher.
#[derive(Debug, Clone)]
pub struct Launcher {
    program: PathBuf,
}

impl Launcher {
    /// Create a launcher for an explicit executable path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Launcher {
            program: program.into(),
        }
    }

    /// Resolve the launcher from tool settings.
    ///
    /// An explicit `launcher` path wins, then `home/bin`, then PATH.
    pub fn resolve(settings: &ToolSettings) -> Option<Self> {
        if let Some(ref launcher) = settings.launcher {
            return Some(Launcher::new(launcher));
        }
        find_launcher(settings.home.as_deref(), LAUNCHER_NAME).map(Launcher::new)
    }

    /// The launcher executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the tool with the given task names in `work_dir`.
    ///
    /// Blocking, single attempt, no timeout. Callers needing a rerun must
    /// call again with a fresh working directory.
    pub fn run(&self, work_dir: &Path, tasks: &[String]) -> Result<InvocationResult, LaunchError> {
        self.run_with_env(work_dir, tasks, &[])
    }

    /// Run the tool with extra environment variables.
    pub fn run_with_env(
        &self,
        work_dir: &Path,
        tasks: &[String],
        env: &[(String, String)],
    ) -> Result<InvocationResult, LaunchError> {
        let mut builder = ProcessBuilder::new(&self.program)
            .args(tasks)
            .cwd(work_dir);
        for (key, value) in env {
            builder = builder.env(key, value);
        }

        tracing::debug!("invoking `{}`", builder.display_command());

        let output = builder.exec_captured().map_err(|source| LaunchError {
            program: self.program.clone(),
            source,
        })?;

        let result = InvocationResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        };

        tracing::debug!("tool exited with code {:?}", result.code);
        Ok(result)
    }

    /// Ask the launcher which tool version it runs.
    ///
    /// Scans `--version` output for the version line, the same way the
    /// tool's own banner prints it.
    pub fn probe_version(&self) -> Result<ToolVersion> {
        let output = ProcessBuilder::new(&self.program)
            .arg("--version")
            .exec()
            .with_context(|| {
                format!("could not probe tool version via `{}`", self.program.display())
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            if let Some(raw) = line.trim().strip_prefix(VERSION_LINE_PREFIX) {
                return ToolVersion::parse(raw.trim())
                    .with_context(|| format!("unparseable version line: `{}`", line.trim()));
            }
        }

        bail!(
            "`{} --version` produced no recognizable version line",
            self.program.display()
        );
    }
}
