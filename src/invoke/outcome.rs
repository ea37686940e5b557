//! Classification of captured invocation results.

use std::fmt;

use serde::Serialize;

use crate::invoke::runner::InvocationResult;

/// Verdict over one tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The tool exited zero and no failure was anticipated.
    Success,
    /// The tool failed and its output contains the anticipated marker:
    /// a known-bad input was correctly rejected. Not an error.
    ExpectedFailure,
    /// Anything else: an unanticipated failure, a failure without the
    /// marker, or a passing build when a failure was anticipated.
    UnexpectedFailure,
}

impl Outcome {
    /// Whether this outcome counts as a verified, acceptable result.
    pub fn is_ok(self) -> bool {
        matches!(self, Outcome::Success | Outcome::ExpectedFailure)
    }

    /// Stable name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ExpectedFailure => "expected-failure",
            Outcome::UnexpectedFailure => "unexpected-failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a captured result against an optional expected failure marker.
///
/// Plain substring containment over combined stdout/stderr; no pattern
/// matching of any kind. Supplying a marker asserts the build must fail,
/// so a zero exit with a marker present classifies as unexpected.
pub fn classify(result: &InvocationResult, expected_marker: Option<&str>) -> Outcome {
    match (result.success(), expected_marker) {
        (true, None) => Outcome::Success,
        (true, Some(_)) => Outcome::UnexpectedFailure,
        (false, Some(marker)) => {
            if result.combined_output().contains(marker) {
                Outcome::ExpectedFailure
            } else {
                Outcome::UnexpectedFailure
            }
        }
        (false, None) => Outcome::UnexpectedFailure,
    }
}
