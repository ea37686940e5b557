//! `drydock check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use drydock::ops::{check, format_report, CheckOptions};

use super::load_config;

pub fn execute(args: CheckArgs, verbose: bool) -> Result<()> {
    let options = CheckOptions {
        tasks: args.tasks.clone(),
        overrides: (&args.overrides).into(),
    };

    let report = check(load_config(), &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report, verbose));
    }

    if !report.all_passed() {
        bail!("verification scenarios failed");
    }

    Ok(())
}
