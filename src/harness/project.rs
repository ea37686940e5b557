//! Isolated scratch projects.
//!
//! Each invocation gets its own freshly created temporary project
//! directory. The directory is owned by the [`ScratchProject`] value and
//! removed when it drops, on every exit path: normal completion, a failed
//! assertion, or a launch error. Parallel invocations are safe because no
//! two projects ever share a directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::descriptor::{InvocationConfig, ScriptBuffer};
use crate::harness::fixtures::Fixture;
use crate::util::fs::write_string;

/// Settings script file name.
pub const SETTINGS_SCRIPT: &str = "settings.gradle.kts";

/// Build script file name.
pub const BUILD_SCRIPT: &str = "build.gradle.kts";

/// A throwaway project directory for one invocation.
#[derive(Debug)]
pub struct ScratchProject {
    dir: TempDir,
}

impl ScratchProject {
    /// Create a fresh, empty scratch project.
    pub fn new() -> Result<Self> {
        let dir = TempDir::with_prefix("drydock-")
            .context("failed to create scratch project directory")?;
        tracing::debug!("scratch project at {}", dir.path().display());
        Ok(ScratchProject { dir })
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Render and write the settings script.
    pub fn write_settings(&self, config: &InvocationConfig) -> Result<PathBuf> {
        let path = self.root().join(SETTINGS_SCRIPT);
        write_string(&path, &config.render_settings())?;
        Ok(path)
    }

    /// Write the accumulated build script.
    pub fn write_build_script(&self, buffer: &ScriptBuffer) -> Result<PathBuf> {
        let path = self.root().join(BUILD_SCRIPT);
        write_string(&path, buffer.text())?;
        Ok(path)
    }

    /// Write a fixture source under `src/main/java/test/`.
    pub fn write_fixture(&self, fixture: Fixture) -> Result<PathBuf> {
        let path = self
            .root()
            .join("src")
            .join("main")
            .join("java")
            .join("test")
            .join(fixture.file_name());
        write_string(&path, fixture.source())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::CapabilitySet;
    use crate::core::version::ToolVersion;
    use url::Url;

    fn config() -> InvocationConfig {
        InvocationConfig::new(
            "dev.drydock.analysis",
            "1.0.0",
            Url::parse("file:///tmp/repository").unwrap(),
            CapabilitySet::resolve(&ToolVersion::parse("7.0").unwrap()),
        )
    }

    #[test]
    fn test_scaffolded_files_land_in_project_root() {
        let project = ScratchProject::new().unwrap();

        let settings = project.write_settings(&config()).unwrap();
        let build = project
            .write_build_script(&ScriptBuffer::base("dev.drydock.analysis"))
            .unwrap();
        let fixture = project.write_fixture(Fixture::Triggering).unwrap();

        assert!(settings.starts_with(project.root()));
        assert!(settings.exists());
        assert!(build.exists());
        assert!(fixture.ends_with("src/main/java/test/Failure.java"));
        assert!(fixture.exists());
    }

    #[test]
    fn test_directory_is_removed_on_drop() {
        let root;
        {
            let project = ScratchProject::new().unwrap();
            root = project.root().to_path_buf();
            project.write_fixture(Fixture::Suppressing).unwrap();
            assert!(root.exists());
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_projects_never_share_a_directory() {
        let a = ScratchProject::new().unwrap();
        let b = ScratchProject::new().unwrap();
        assert_ne!(a.root(), b.root());
    }
}
