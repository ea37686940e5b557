//! `drydock render` command

use anyhow::Result;

use crate::cli::{RenderArgs, ScriptKind};
use drydock::harness::project::{BUILD_SCRIPT, SETTINGS_SCRIPT};
use drydock::ops::{render, RenderOptions};

use super::load_config;

pub fn execute(args: RenderArgs) -> Result<()> {
    let options = RenderOptions {
        overrides: (&args.overrides).into(),
        extra_repositories: args.extra_repositories.clone(),
        resolution_rules: args.resolution_rules.clone(),
    };

    let scripts = render(load_config(), &options)?;

    match args.only {
        Some(ScriptKind::Settings) => print!("{}", scripts.settings),
        Some(ScriptKind::Build) => print!("{}", scripts.build),
        None => {
            println!("# {}", SETTINGS_SCRIPT);
            print!("{}", scripts.settings);
            println!();
            println!("# {}", BUILD_SCRIPT);
            print!("{}", scripts.build);
        }
    }

    Ok(())
}
