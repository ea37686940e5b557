//! `drydock run` command

use anyhow::{bail, Result};

use crate::cli::{FixtureKind, RunArgs};
use drydock::ops::{run, RunOptions};
use drydock::util::diagnostic::{emit, suggestions, Diagnostic};
use drydock::{Fixture, Outcome};

use super::load_config;

pub fn execute(args: RunArgs, verbose: bool) -> Result<()> {
    let fixture = match args.fixture {
        FixtureKind::Suppressing => Fixture::Suppressing,
        FixtureKind::Triggering => Fixture::Triggering,
    };

    let options = RunOptions {
        fixture,
        tasks: args.tasks.clone(),
        marker: args.marker.clone(),
        overrides: (&args.overrides).into(),
    };

    let report = run(load_config(), &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Outcome: {}", report.outcome);
        if let Some(code) = report.exit_code {
            println!("Exit code: {}", code);
        }
        if verbose {
            if !report.stdout.is_empty() {
                println!("\n--- stdout ---\n{}", report.stdout);
            }
            if !report.stderr.is_empty() {
                println!("\n--- stderr ---\n{}", report.stderr);
            }
        }
    }

    if report.outcome == Outcome::UnexpectedFailure {
        if !args.json {
            let mut diag = Diagnostic::error("run classified as an unexpected failure")
                .with_suggestion(suggestions::UNEXPECTED_FAILURE);
            if let Some(ref marker) = report.marker {
                diag = diag.with_context(format!("expected marker: {}", marker));
            }
            emit(&diag, false);
        }
        bail!("verification failed");
    }

    Ok(())
}
