//! `drydock probe` command

use anyhow::Result;

use crate::cli::ProbeArgs;
use drydock::ops::{format_probe, probe, ProbeOptions};

use super::load_config;

pub fn execute(args: ProbeArgs) -> Result<()> {
    let options = ProbeOptions {
        overrides: (&args.overrides).into(),
    };

    let report = probe(load_config(), &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_probe(&report));
    }

    Ok(())
}
