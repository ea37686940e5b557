//! Command implementations

pub mod check;
pub mod completions;
pub mod probe;
pub mod render;
pub mod run;

use std::path::PathBuf;

use crate::cli::OverrideArgs;
use drydock::ops::ConfigOverrides;
use drydock::HarnessConfig;

/// Load the merged configuration for the current directory.
pub fn load_config() -> HarnessConfig {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    HarnessConfig::load(&cwd)
}

impl From<&OverrideArgs> for ConfigOverrides {
    fn from(args: &OverrideArgs) -> Self {
        ConfigOverrides {
            tool_version: args.tool_version.clone(),
            launcher: args.launcher.clone(),
            plugin_id: args.plugin_id.clone(),
            plugin_version: args.plugin_version.clone(),
            repository: args.repository.clone(),
            java_home: args.java_home.clone(),
            compiler_major: args.compiler_major,
        }
    }
}
