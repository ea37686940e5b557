//! The invocation harness.
//!
//! Ties the pieces together: resolve the tool version and its
//! capabilities once at setup, scaffold an isolated scratch project per
//! invocation, drive the external tool, classify the outcome.

pub mod fixtures;
pub mod project;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::core::capability::CapabilitySet;
use crate::core::descriptor::{InvocationConfig, ScriptBuffer};
use crate::core::version::ToolVersion;
use crate::invoke::outcome::{classify, Outcome};
use crate::invoke::runner::{InvocationResult, Launcher};
use crate::util::config::HarnessConfig;
use crate::util::diagnostic::suggestions;

pub use fixtures::{Fixture, ARRAY_EQUALS_MARKER};
pub use project::ScratchProject;

/// Dependency group/artifact of the analysis library the plugin wires in.
const ANALYSIS_COORDINATE: &str = "com.google.errorprone:error_prone_core";

/// Dependency group/artifact of the forked compiler used on legacy JVMs.
const FORKED_JAVAC_COORDINATE: &str = "com.google.errorprone:javac";

/// A configured harness: launcher, tool version and capabilities resolved
/// once at setup, read-only for the rest of the run.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    version: ToolVersion,
    capabilities: CapabilitySet,
    launcher: Option<Launcher>,
}

impl Harness {
    /// Build a harness from merged configuration.
    ///
    /// The tool version comes from config when present, otherwise from
    /// probing the launcher. Parse and launch problems abort setup; they
    /// are never retried. A missing launcher is only an error once
    /// something actually needs to be launched, so rendering works on
    /// hosts without the tool installed.
    pub fn from_config(config: HarnessConfig) -> Result<Self> {
        let launcher = Launcher::resolve(&config.tool);

        let version = match &config.tool.version {
            Some(raw) => ToolVersion::parse(raw)
                .with_context(|| format!("invalid configured tool version `{}`", raw))?,
            None => launcher
                .as_ref()
                .ok_or_else(|| {
                    anyhow!(
                        "no tool version configured and no launcher to probe\n{}",
                        suggestions::NO_TOOL_VERSION
                    )
                })?
                .probe_version()?,
        };
        let capabilities = CapabilitySet::resolve(&version);

        tracing::info!("tool version {}", version);

        Ok(Harness {
            config,
            version,
            capabilities,
            launcher,
        })
    }

    /// The resolved tool version.
    pub fn version(&self) -> &ToolVersion {
        &self.version
    }

    /// Capabilities of the resolved tool version.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The resolved launcher, if one was found.
    pub fn launcher(&self) -> Option<&Launcher> {
        self.launcher.as_ref()
    }

    /// The resolved launcher, or an actionable error.
    pub fn require_launcher(&self) -> Result<&Launcher> {
        self.launcher
            .as_ref()
            .ok_or_else(|| anyhow!("no build-tool launcher found\n{}", suggestions::NO_LAUNCHER))
    }

    /// Assemble the invocation config for one run.
    pub fn invocation_config(&self) -> Result<InvocationConfig> {
        let plugin_version = self.config.plugin.version.clone().ok_or_else(|| {
            anyhow!(
                "no plugin version configured\n{}",
                suggestions::NO_PLUGIN_VERSION
            )
        })?;

        Ok(InvocationConfig::new(
            &self.config.plugin.id,
            plugin_version,
            self.plugin_repository()?,
            self.capabilities.clone(),
        ))
    }

    /// Assemble the build script for one run, applying the augmentations
    /// the configuration calls for.
    pub fn build_script(&self) -> ScriptBuffer {
        let mut buffer = ScriptBuffer::base(&self.config.plugin.id);

        if let Some(ref analysis_version) = self.config.plugin.analysis_version {
            let coordinate = format!("{}:{}", ANALYSIS_COORDINATE, analysis_version);
            buffer.apply_analysis_dependency(&coordinate);
        }

        if let Some(ref java_home) = self.config.tool.java_home {
            buffer.apply_fork_home(java_home, &self.capabilities);
        }

        if let (Some(major), Some(javac_version)) = (
            self.config.tool.compiler_major,
            self.config.plugin.forked_javac_version.as_deref(),
        ) {
            let coordinate = format!("{}:{}", FORKED_JAVAC_COORDINATE, javac_version);
            buffer.apply_legacy_bootclasspath(major, &coordinate, &self.capabilities);
        }

        buffer
    }

    /// Scaffold a scratch project containing the given fixture.
    pub fn scaffold(&self, fixture: Fixture) -> Result<ScratchProject> {
        let project = ScratchProject::new()?;
        project.write_settings(&self.invocation_config()?)?;
        project.write_build_script(&self.build_script())?;
        project.write_fixture(fixture)?;
        Ok(project)
    }

    /// Run the tool in a scaffolded project.
    pub fn run(&self, project: &ScratchProject, tasks: &[String]) -> Result<InvocationResult> {
        let launcher = self.require_launcher()?;
        let result = launcher
            .run(project.root(), tasks)
            .with_context(|| format!("launching `{}`", launcher.program().display()))?;
        Ok(result)
    }

    /// Scaffold, run and classify in one step.
    ///
    /// The scratch project lives exactly as long as this call; cleanup
    /// happens on every exit path.
    pub fn verify(
        &self,
        fixture: Fixture,
        tasks: &[String],
    ) -> Result<(Outcome, InvocationResult)> {
        let project = self.scaffold(fixture)?;
        let result = self.run(&project, tasks)?;
        let outcome = classify(&result, fixture.expected_marker());
        Ok((outcome, result))
    }

    fn plugin_repository(&self) -> Result<Url> {
        if let Some(ref raw) = self.config.plugin.repository {
            return Url::parse(raw).with_context(|| format!("invalid plugin repository `{}`", raw));
        }

        // Default to the conventional local publishing repository.
        let fallback = std::env::current_dir()
            .context("cannot determine working directory")?
            .join("build")
            .join("repository");
        Url::from_directory_path(&fallback)
            .map_err(|()| anyhow!("cannot express `{}` as a URL", fallback.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn config_with(tool_version: &str) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.tool.launcher = Some(PathBuf::from("/opt/tool/bin/gradle"));
        config.tool.version = Some(tool_version.to_string());
        config.plugin.version = Some("1.0.0".to_string());
        config.plugin.repository = Some("file:///var/repo/".to_string());
        config
    }

    #[test]
    fn test_setup_resolves_capabilities_from_configured_version() {
        let harness = Harness::from_config(config_with("4.5")).unwrap();
        assert!(!harness.capabilities().lazy_task_configuration());

        let harness = Harness::from_config(config_with("7.0")).unwrap();
        assert!(harness.capabilities().lazy_task_configuration());
    }

    #[test]
    fn test_setup_rejects_malformed_version() {
        let err = Harness::from_config(config_with("not-a-version")).unwrap_err();
        assert!(err.to_string().contains("not-a-version"));
    }

    #[test]
    fn test_missing_plugin_version_is_reported_with_help() {
        let mut config = config_with("7.0");
        config.plugin.version = None;
        let harness = Harness::from_config(config).unwrap();

        let err = harness.invocation_config().unwrap_err();
        assert!(err.to_string().contains("plugin version"));
    }

    #[test]
    fn test_build_script_applies_configured_augmentations() {
        let mut config = config_with("7.0");
        config.tool.java_home = Some(PathBuf::from("/opt/jdk8"));
        config.tool.compiler_major = Some(8);
        config.plugin.forked_javac_version = Some("9+181-r4173-1".to_string());
        let harness = Harness::from_config(config).unwrap();

        let script = harness.build_script();
        assert!(script.text().contains("File(\"/opt/jdk8\")"));
        assert!(script
            .text()
            .contains("forkedJavac(\"com.google.errorprone:javac:9+181-r4173-1\")"));
        assert_eq!(script.text().matches("options.isFork = true").count(), 2);
    }

    #[test]
    fn test_build_script_pins_analysis_library_when_configured() {
        let mut config = config_with("7.0");
        config.plugin.analysis_version = Some("2.4.0".to_string());
        let harness = Harness::from_config(config).unwrap();

        assert!(harness
            .build_script()
            .text()
            .contains("\"errorprone\"(\"com.google.errorprone:error_prone_core:2.4.0\")"));
    }

    #[test]
    fn test_build_script_skips_legacy_block_on_modern_compilers() {
        let mut config = config_with("7.0");
        config.tool.compiler_major = Some(11);
        config.plugin.forked_javac_version = Some("9+181-r4173-1".to_string());
        let harness = Harness::from_config(config).unwrap();

        assert!(!harness.build_script().text().contains("forkedJavac"));
    }

    #[test]
    fn test_scaffold_writes_full_project() {
        let harness = Harness::from_config(config_with("7.0")).unwrap();
        let project = harness.scaffold(Fixture::Suppressing).unwrap();

        assert!(project.root().join("settings.gradle.kts").exists());
        assert!(project.root().join("build.gradle.kts").exists());
        assert!(project
            .root()
            .join("src/main/java/test/Success.java")
            .exists());
    }

    #[test]
    fn test_explicit_repository_must_be_a_url() {
        let mut config = config_with("7.0");
        config.plugin.repository = Some("not a url".to_string());
        let harness = Harness::from_config(config).unwrap();
        assert!(harness.invocation_config().is_err());
    }

    #[test]
    fn test_launcher_path_is_kept_verbatim() {
        let harness = Harness::from_config(config_with("7.0")).unwrap();
        assert_eq!(
            harness.launcher().unwrap().program(),
            Path::new("/opt/tool/bin/gradle")
        );
    }
}
