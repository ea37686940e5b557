//! End-to-end verification battery.
//!
//! Two scenarios against the real tool: a suppressing fixture must build
//! cleanly, a triggering fixture must fail with the known diagnostic
//! marker. Each scenario gets its own scratch project.

use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;

use crate::harness::{Fixture, Harness};
use crate::invoke::outcome::Outcome;
use crate::ops::ConfigOverrides;
use crate::util::config::HarnessConfig;

/// Result of a single scenario.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Name of the scenario
    pub name: String,

    /// Whether the scenario held
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// How long the scenario took
    #[serde(skip)]
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed,
            message: message.into(),
            duration: Duration::ZERO,
        }
    }

    fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all scenarios.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Individual scenario results
    pub checks: Vec<CheckResult>,
}

impl CheckReport {
    /// Whether every scenario held.
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Options for the check operation.
#[derive(Debug)]
pub struct CheckOptions {
    /// Task names to run in each scenario.
    pub tasks: Vec<String>,
    /// Config overrides from the command line.
    pub overrides: ConfigOverrides,
}

/// Run both verification scenarios.
pub fn check(mut config: HarnessConfig, options: &CheckOptions) -> Result<CheckReport> {
    options.overrides.apply(&mut config);
    let harness = Harness::from_config(config)?;

    let mut report = CheckReport { checks: Vec::new() };
    report.checks.push(scenario(
        &harness,
        "suppressing source builds cleanly",
        Fixture::Suppressing,
        Outcome::Success,
        &options.tasks,
    ));
    report.checks.push(scenario(
        &harness,
        "triggering source fails with the diagnostic",
        Fixture::Triggering,
        Outcome::ExpectedFailure,
        &options.tasks,
    ));

    Ok(report)
}

fn scenario(
    harness: &Harness,
    name: &str,
    fixture: Fixture,
    expected: Outcome,
    tasks: &[String],
) -> CheckResult {
    let start = Instant::now();
    let result = match harness.verify(fixture, tasks) {
        Ok((outcome, invocation)) => {
            let passed = outcome == expected;
            let message = format!(
                "classified {} (expected {}), exit code {:?}",
                outcome, expected, invocation.code
            );
            CheckResult::new(name, passed, message)
        }
        Err(e) => CheckResult::new(name, false, format!("{:#}", e)),
    };
    result.with_duration(start.elapsed())
}

/// Format a check report for terminal output.
pub fn format_report(report: &CheckReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    writeln!(output, "Verification scenarios:").unwrap();
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        writeln!(output, "  {} {}", status, check.name).unwrap();

        if verbose || !check.passed {
            writeln!(output, "      {}", check.message).unwrap();
        }
    }

    writeln!(output).unwrap();

    let passed = report.checks.iter().filter(|c| c.passed).count();
    let failed = report.checks.len() - passed;
    writeln!(output, "Summary: {} passed, {} failed", passed, failed).unwrap();

    output
}
