//! Lenient dotted version identifiers for external build tools.
//!
//! Build-tool releases are not semver: `"5"`, `"4.10.2"` and `"7.0-rc-1"`
//! are all valid identifiers, and `"5"` must compare equal to `"5.0"`.
//! This module provides a total ordering over such identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use miette::{Diagnostic as MietteDiagnostic, SourceSpan};
use thiserror::Error;

/// Error produced when a raw version identifier cannot be parsed.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum VersionParseError {
    #[error("empty version identifier")]
    #[diagnostic(code(drydock::version::empty))]
    Empty,

    #[error("invalid numeric component in version `{raw}`")]
    #[diagnostic(
        code(drydock::version::component),
        help("version identifiers look like `5`, `6.8.1` or `7.0-rc-1`")
    )]
    Component {
        #[source_code]
        raw: String,
        #[label("expected a number")]
        span: SourceSpan,
    },

    #[error("empty qualifier in version `{raw}`")]
    #[diagnostic(code(drydock::version::qualifier))]
    EmptyQualifier {
        #[source_code]
        raw: String,
        #[label("nothing after the dash")]
        span: SourceSpan,
    },
}

/// A parsed build-tool version: ordered numeric components plus an
/// optional pre-release qualifier.
///
/// Missing trailing components count as zero, so `"5"` and `"5.0"` are
/// equal. A qualified version orders before its unqualified base
/// (`7.0-rc-1 < 7.0`); two qualifiers compare lexicographically.
#[derive(Debug, Clone)]
pub struct ToolVersion {
    parts: Vec<u64>,
    qualifier: Option<String>,
}

impl ToolVersion {
    /// Parse a raw version identifier.
    ///
    /// Fails on empty input and on any non-numeric dotted component;
    /// everything after the first dash is the qualifier.
    pub fn parse(raw: &str) -> Result<Self, VersionParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let (numeric, qualifier) = match raw.split_once('-') {
            Some((numeric, qualifier)) => {
                if qualifier.is_empty() {
                    return Err(VersionParseError::EmptyQualifier {
                        raw: raw.to_string(),
                        span: (numeric.len(), 1).into(),
                    });
                }
                (numeric, Some(qualifier.to_string()))
            }
            None => (raw, None),
        };

        let mut parts = Vec::new();
        let mut offset = 0;
        for component in numeric.split('.') {
            match component.parse::<u64>() {
                Ok(n) => parts.push(n),
                Err(_) => {
                    return Err(VersionParseError::Component {
                        raw: raw.to_string(),
                        span: (offset, component.len().max(1)).into(),
                    });
                }
            }
            offset += component.len() + 1;
        }

        Ok(ToolVersion { parts, qualifier })
    }

    /// Build a version from numeric components only.
    ///
    /// Used for fixed thresholds; `parts` must be non-empty.
    pub fn from_parts(parts: &[u64]) -> Self {
        assert!(!parts.is_empty(), "version needs at least one component");
        ToolVersion {
            parts: parts.to_vec(),
            qualifier: None,
        }
    }

    /// The leading (major) component.
    pub fn major(&self) -> u64 {
        self.parts[0]
    }

    /// The pre-release qualifier, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl Ord for ToolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
        }

        // A qualified version is a pre-release of its base.
        match (&self.qualifier, &other.qualifier) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ToolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToolVersion {}

impl FromStr for ToolVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolVersion::parse(s)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeric = self
            .parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".");
        match &self.qualifier {
            Some(q) => write!(f, "{}-{}", numeric, q),
            None => write!(f, "{}", numeric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: &str) -> ToolVersion {
        ToolVersion::parse(raw).unwrap()
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(v("5"), v("5.0"));
        assert_eq!(v("5"), v("5.0.0"));
        assert_ne!(v("5"), v("5.0.1"));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(v("4.9") < v("4.10"));
        assert!(v("4.10.2") > v("4.10"));
        assert!(v("7.0") > v("6.8.3"));
    }

    #[test]
    fn test_qualifier_orders_before_release() {
        assert!(v("7.0-rc-1") < v("7.0"));
        assert!(v("7.0-rc-1") < v("7.0-rc-2"));
        assert!(v("7.0-rc-1") > v("6.9"));
    }

    #[test]
    fn test_ordering_is_transitive() {
        let a = v("4.5");
        let b = v("4.9");
        let c = v("7.0");
        assert!(a < b && b < c && a < c);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            ToolVersion::parse(""),
            Err(VersionParseError::Empty)
        ));
        assert!(matches!(
            ToolVersion::parse("   "),
            Err(VersionParseError::Empty)
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_component() {
        assert!(matches!(
            ToolVersion::parse("x.1"),
            Err(VersionParseError::Component { .. })
        ));
        assert!(matches!(
            ToolVersion::parse("4..2"),
            Err(VersionParseError::Component { .. })
        ));
        assert!(matches!(
            ToolVersion::parse("7.0-"),
            Err(VersionParseError::EmptyQualifier { .. })
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["5", "4.10.2", "7.0-rc-1"] {
            assert_eq!(v(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_major_accessor() {
        assert_eq!(v("6.8.3").major(), 6);
        assert_eq!(v("7.0-rc-1").major(), 7);
    }
}
