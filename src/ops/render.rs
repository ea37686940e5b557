//! Standalone rendering of invocation scripts.
//!
//! Renders the same settings and build scripts the harness writes into
//! scratch projects, without creating any directories or launching
//! anything. Output is deterministic, so rendered scripts double as
//! reproducible fixtures.

use anyhow::{Context, Result};
use url::Url;

use crate::harness::Harness;
use crate::ops::ConfigOverrides;
use crate::util::config::HarnessConfig;

/// Options for the render operation.
#[derive(Debug, Default)]
pub struct RenderOptions {
    /// Config overrides from the command line.
    pub overrides: ConfigOverrides,
    /// Extra plugin repositories to declare.
    pub extra_repositories: Vec<String>,
    /// Extra resolution-strategy rules to splice in.
    pub resolution_rules: Vec<String>,
}

/// The rendered pair of scripts.
#[derive(Debug)]
pub struct RenderedScripts {
    /// Settings script text.
    pub settings: String,
    /// Build script text.
    pub build: String,
}

/// Render the invocation scripts for the given configuration.
pub fn render(mut config: HarnessConfig, options: &RenderOptions) -> Result<RenderedScripts> {
    options.overrides.apply(&mut config);

    let harness = Harness::from_config(config)?;

    let mut invocation = harness.invocation_config()?;
    for raw in &options.extra_repositories {
        let url = Url::parse(raw).with_context(|| format!("invalid extra repository `{}`", raw))?;
        invocation = invocation.with_extra_repository(url);
    }
    for rule in &options.resolution_rules {
        invocation = invocation.with_resolution_rule(rule);
    }

    Ok(RenderedScripts {
        settings: invocation.render_settings(),
        build: harness.build_script().text().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options() -> RenderOptions {
        RenderOptions {
            overrides: ConfigOverrides {
                tool_version: Some("7.0".to_string()),
                plugin_version: Some("1.0.0".to_string()),
                repository: Some("file:///var/repo/".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_render_produces_both_scripts() {
        let scripts = render(HarnessConfig::default(), &options()).unwrap();
        assert!(scripts.settings.contains("useVersion(\"1.0.0\")"));
        assert!(scripts.build.contains("id(\"dev.drydock.analysis\")"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render(HarnessConfig::default(), &options()).unwrap();
        let b = render(HarnessConfig::default(), &options()).unwrap();
        assert_eq!(a.settings, b.settings);
        assert_eq!(a.build, b.build);
    }

    #[test]
    fn test_render_includes_extra_repositories() {
        let mut opts = options();
        opts.extra_repositories
            .push("https://plugins.example.com/m2".to_string());
        let scripts = render(HarnessConfig::default(), &opts).unwrap();
        assert!(scripts
            .settings
            .contains("uri(\"https://plugins.example.com/m2\")"));
    }

    #[test]
    fn test_render_rejects_bad_extra_repository() {
        let mut opts = options();
        opts.extra_repositories.push(":: not a url ::".to_string());
        assert!(render(HarnessConfig::default(), &opts).is_err());
    }

    #[test]
    fn test_render_reflects_fork_home_override() {
        let mut opts = options();
        opts.overrides.java_home = Some(PathBuf::from("/opt/jdk8"));
        let scripts = render(HarnessConfig::default(), &opts).unwrap();
        assert!(scripts.build.contains("options.forkOptions.javaHome = File(\"/opt/jdk8\")"));
    }
}
