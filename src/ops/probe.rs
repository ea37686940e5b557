//! Tool-version and capability probing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::capability::CapabilitySet;
use crate::core::version::ToolVersion;
use crate::invoke::runner::Launcher;
use crate::ops::ConfigOverrides;
use crate::util::config::HarnessConfig;
use crate::util::diagnostic::suggestions;

/// Options for the probe operation.
#[derive(Debug, Default)]
pub struct ProbeOptions {
    /// Config overrides from the command line.
    pub overrides: ConfigOverrides,
}

/// What a probe found out about the tool under test.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    /// The resolved tool version.
    pub version: String,
    /// Launcher path, when one was resolved.
    pub launcher: Option<PathBuf>,
    /// Whether the version was configured or detected from the launcher.
    pub source: VersionSource,
    /// Capability flags of the resolved version.
    pub capabilities: BTreeMap<String, bool>,
}

/// Where the resolved version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSource {
    Configured,
    Detected,
}

/// Resolve the tool version and its capabilities.
///
/// A configured version needs no launcher; detection shells out to
/// `<launcher> --version`.
pub fn probe(mut config: HarnessConfig, options: &ProbeOptions) -> Result<ProbeReport> {
    options.overrides.apply(&mut config);

    let launcher = Launcher::resolve(&config.tool);

    let (version, source) = match &config.tool.version {
        Some(raw) => (ToolVersion::parse(raw)?, VersionSource::Configured),
        None => {
            let launcher = launcher.as_ref().ok_or_else(|| {
                anyhow!(
                    "no tool version configured and no launcher to probe\n{}",
                    suggestions::NO_LAUNCHER
                )
            })?;
            (launcher.probe_version()?, VersionSource::Detected)
        }
    };

    let capabilities = CapabilitySet::resolve(&version)
        .iter()
        .map(|(name, on)| (name.to_string(), on))
        .collect();

    Ok(ProbeReport {
        version: version.to_string(),
        launcher: launcher.map(|l| l.program().to_path_buf()),
        source,
        capabilities,
    })
}

/// Format a probe report for terminal output.
pub fn format_probe(report: &ProbeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Tool version: {}", report.version));
    match report.source {
        VersionSource::Configured => out.push_str(" (configured)\n"),
        VersionSource::Detected => out.push_str(" (detected)\n"),
    }
    match &report.launcher {
        Some(path) => out.push_str(&format!("Launcher:     {}\n", path.display())),
        None => out.push_str("Launcher:     not found\n"),
    }
    out.push('\n');
    out.push_str("Capabilities:\n");
    for (name, on) in &report.capabilities {
        let mark = if *on { "yes" } else { "no" };
        out.push_str(&format!("  {:<28} {}\n", name, mark));
    }
    out
}
