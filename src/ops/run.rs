//! One scaffold-run-classify cycle.

use anyhow::Result;
use serde::Serialize;

use crate::harness::{Fixture, Harness};
use crate::invoke::outcome::{classify, Outcome};
use crate::ops::ConfigOverrides;
use crate::util::config::HarnessConfig;

/// Options for the run operation.
#[derive(Debug)]
pub struct RunOptions {
    /// Which fixture source to place into the scratch project.
    pub fixture: Fixture,
    /// Task names passed to the tool, in order.
    pub tasks: Vec<String>,
    /// Marker overriding the fixture's own expectation, if any.
    pub marker: Option<String>,
    /// Config overrides from the command line.
    pub overrides: ConfigOverrides,
}

/// Outcome of one run, ready for reporting.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// The classification verdict.
    pub outcome: Outcome,
    /// Tool exit code, if it exited normally.
    pub exit_code: Option<i32>,
    /// The marker the output was checked against, if any.
    pub marker: Option<String>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Scaffold a scratch project, invoke the tool once, classify the result.
///
/// The scratch directory exists only for the duration of this call and is
/// removed on every exit path.
pub fn run(mut config: HarnessConfig, options: &RunOptions) -> Result<RunReport> {
    options.overrides.apply(&mut config);

    let harness = Harness::from_config(config)?;
    let project = harness.scaffold(options.fixture)?;
    let result = harness.run(&project, &options.tasks)?;

    let marker = options
        .marker
        .as_deref()
        .or_else(|| options.fixture.expected_marker());
    let outcome = classify(&result, marker);

    tracing::info!("classified as {}", outcome);

    Ok(RunReport {
        outcome,
        exit_code: result.code,
        marker: marker.map(str::to_string),
        stdout: result.stdout,
        stderr: result.stderr,
    })
}
