//! High-level operations.
//!
//! This module contains the implementation of drydock commands.

pub mod check;
pub mod probe;
pub mod render;
pub mod run;

use std::path::PathBuf;

use crate::util::config::HarnessConfig;

pub use check::{check, format_report, CheckOptions, CheckReport, CheckResult};
pub use probe::{probe, format_probe, ProbeOptions, ProbeReport};
pub use render::{render, RenderOptions, RenderedScripts};
pub use run::{run, RunOptions, RunReport};

/// Command-line overrides layered on top of the merged configuration.
///
/// `Some` fields win over config-file and environment values.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Tool version under test.
    pub tool_version: Option<String>,
    /// Launcher executable path.
    pub launcher: Option<PathBuf>,
    /// Plugin identifier.
    pub plugin_id: Option<String>,
    /// Plugin version pin.
    pub plugin_version: Option<String>,
    /// Plugin repository URL.
    pub repository: Option<String>,
    /// Alternate Java home for forked compilation.
    pub java_home: Option<PathBuf>,
    /// Major version of the Java compiler the build runs on.
    pub compiler_major: Option<u32>,
}

impl ConfigOverrides {
    /// Apply these overrides to a merged configuration.
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(ref version) = self.tool_version {
            config.tool.version = Some(version.clone());
        }
        if let Some(ref launcher) = self.launcher {
            config.tool.launcher = Some(launcher.clone());
        }
        if let Some(ref id) = self.plugin_id {
            config.plugin.id = id.clone();
        }
        if let Some(ref version) = self.plugin_version {
            config.plugin.version = Some(version.clone());
        }
        if let Some(ref repository) = self.repository {
            config.plugin.repository = Some(repository.clone());
        }
        if let Some(ref java_home) = self.java_home {
            config.tool.java_home = Some(java_home.clone());
        }
        if let Some(major) = self.compiler_major {
            config.tool.compiler_major = Some(major);
        }
    }
}
