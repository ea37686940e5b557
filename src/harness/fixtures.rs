//! Sample source fixtures.
//!
//! Two fixed Java sources exercise the same anti-pattern (comparing
//! arrays with `equals`, which is reference equality): one suppresses
//! the diagnostic and must compile, one triggers it and must fail. The
//! triggering source keeps the call on line 6 so the diagnostic marker
//! below stays stable.

/// Diagnostic line emitted when the triggering fixture is compiled.
pub const ARRAY_EQUALS_MARKER: &str = "Failure.java:6: error: [ArrayEquals]";

/// A sample source file to place into a scratch project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Suppresses the diagnostic; compilation must succeed.
    Suppressing,
    /// Triggers the diagnostic; compilation must fail with the marker.
    Triggering,
}

impl Fixture {
    /// File name under `src/main/java/test/`.
    pub fn file_name(self) -> &'static str {
        match self {
            Fixture::Suppressing => "Success.java",
            Fixture::Triggering => "Failure.java",
        }
    }

    /// Full source text.
    pub fn source(self) -> &'static str {
        match self {
            Fixture::Suppressing => {
                r#"package test;

public class Success {
    // See http://errorprone.info/bugpattern/ArrayEquals
    @SuppressWarnings("ArrayEquals")
    public boolean arrayEquals(int[] a, int[] b) {
        return a.equals(b);
    }
}
"#
            }
            Fixture::Triggering => {
                r#"package test;

public class Failure {
    // See http://errorprone.info/bugpattern/ArrayEquals
    public boolean arrayEquals(int[] a, int[] b) {
        return a.equals(b);
    }
}
"#
            }
        }
    }

    /// The marker expected in build output, if this fixture must fail.
    pub fn expected_marker(self) -> Option<&'static str> {
        match self {
            Fixture::Suppressing => None,
            Fixture::Triggering => Some(ARRAY_EQUALS_MARKER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_line_number_matches_source() {
        // The diagnostic names line 6; the offending call must sit there.
        let line_six = Fixture::Triggering.source().lines().nth(5).unwrap();
        assert!(line_six.contains("a.equals(b)"));
    }

    #[test]
    fn test_suppressing_fixture_carries_suppression() {
        assert!(Fixture::Suppressing
            .source()
            .contains("@SuppressWarnings(\"ArrayEquals\")"));
        assert!(Fixture::Suppressing.expected_marker().is_none());
    }

    #[test]
    fn test_triggering_fixture_expects_the_marker() {
        assert_eq!(
            Fixture::Triggering.expected_marker(),
            Some(ARRAY_EQUALS_MARKER)
        );
    }
}
