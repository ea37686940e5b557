//! Configuration file support for drydock.
//!
//! Two configuration file locations are supported:
//! - Global: `~/.config/drydock/config.toml` - User-wide defaults
//! - Project: `.drydock/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and `DRYDOCK_*`
//! environment variables override both. The merged result is read once at
//! harness setup and treated as immutable afterwards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Harness configuration, merged from global config, project config and
/// environment overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// External build-tool settings
    pub tool: ToolSettings,

    /// Plugin-under-test settings
    pub plugin: PluginSettings,
}

/// Settings describing the external build tool being driven.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Path to the launcher executable (e.g. /opt/gradle/bin/gradle)
    pub launcher: Option<PathBuf>,

    /// Tool installation directory; the launcher is expected under `bin/`
    pub home: Option<PathBuf>,

    /// Tool version under test (probed from the launcher when absent)
    pub version: Option<String>,

    /// Alternate Java home used to fork compilation
    pub java_home: Option<PathBuf>,

    /// Major version of the Java compiler the build runs on
    pub compiler_major: Option<u32>,
}

/// Settings describing the compiler plugin under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Plugin identifier, matched exactly by the pinning rule
    pub id: String,

    /// Plugin version under test
    pub version: Option<String>,

    /// Repository the plugin is resolved from (URL)
    pub repository: Option<String>,

    /// Version of the analysis library the plugin wires in
    pub analysis_version: Option<String>,

    /// Version of the forked compiler used on legacy JVMs
    pub forked_javac_version: Option<String>,
}

impl Default for PluginSettings {
    fn default() -> Self {
        PluginSettings {
            id: "dev.drydock.analysis".to_string(),
            version: None,
            repository: None,
            analysis_version: None,
            forked_javac_version: None,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_file_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load_file(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load the merged configuration for a project directory.
    ///
    /// Merge order: global config, then project config, then `DRYDOCK_*`
    /// environment variables.
    pub fn load(project_root: &Path) -> Self {
        let mut config = match global_config_path() {
            Some(path) => Self::load_file_or_default(&path),
            None => Self::default(),
        };

        let project_path = project_config_path(project_root);
        if project_path.exists() {
            config.merge(Self::load_file_or_default(&project_path));
        }

        config.apply_env_overrides();
        config
    }

    /// Overlay another config on top of this one.
    ///
    /// `Some` fields in `other` win; `None` fields keep the current value.
    pub fn merge(&mut self, other: HarnessConfig) {
        let HarnessConfig { tool, plugin } = other;

        if tool.launcher.is_some() {
            self.tool.launcher = tool.launcher;
        }
        if tool.home.is_some() {
            self.tool.home = tool.home;
        }
        if tool.version.is_some() {
            self.tool.version = tool.version;
        }
        if tool.java_home.is_some() {
            self.tool.java_home = tool.java_home;
        }
        if tool.compiler_major.is_some() {
            self.tool.compiler_major = tool.compiler_major;
        }

        if plugin.id != PluginSettings::default().id {
            self.plugin.id = plugin.id;
        }
        if plugin.version.is_some() {
            self.plugin.version = plugin.version;
        }
        if plugin.repository.is_some() {
            self.plugin.repository = plugin.repository;
        }
        if plugin.analysis_version.is_some() {
            self.plugin.analysis_version = plugin.analysis_version;
        }
        if plugin.forked_javac_version.is_some() {
            self.plugin.forked_javac_version = plugin.forked_javac_version;
        }
    }

    /// Apply `DRYDOCK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(launcher) = std::env::var("DRYDOCK_LAUNCHER") {
            self.tool.launcher = Some(PathBuf::from(launcher));
        }
        if let Ok(home) = std::env::var("DRYDOCK_TOOL_HOME") {
            self.tool.home = Some(PathBuf::from(home));
        }
        if let Ok(version) = std::env::var("DRYDOCK_TOOL_VERSION") {
            self.tool.version = Some(version);
        }
        if let Ok(java_home) = std::env::var("DRYDOCK_JAVA_HOME") {
            self.tool.java_home = Some(PathBuf::from(java_home));
        }
        if let Ok(major) = std::env::var("DRYDOCK_COMPILER_MAJOR") {
            match major.parse() {
                Ok(major) => self.tool.compiler_major = Some(major),
                Err(_) => tracing::warn!("ignoring non-numeric DRYDOCK_COMPILER_MAJOR: {}", major),
            }
        }
        if let Ok(id) = std::env::var("DRYDOCK_PLUGIN_ID") {
            self.plugin.id = id;
        }
        if let Ok(version) = std::env::var("DRYDOCK_PLUGIN_VERSION") {
            self.plugin.version = Some(version);
        }
        if let Ok(repository) = std::env::var("DRYDOCK_PLUGIN_REPOSITORY") {
            self.plugin.repository = Some(repository);
        }
        if let Ok(version) = std::env::var("DRYDOCK_ANALYSIS_VERSION") {
            self.plugin.analysis_version = Some(version);
        }
        if let Ok(version) = std::env::var("DRYDOCK_FORKED_JAVAC_VERSION") {
            self.plugin.forked_javac_version = Some(version);
        }
    }
}

/// Path to the global config file, if a home directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "drydock", "drydock")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Path to the project-local config file.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".drydock").join("config.toml")
}
