//! Capability flags resolved from a build-tool version.
//!
//! Every version threshold in the crate lives here. The rest of the code
//! branches on named boolean flags, never on raw version comparisons, so
//! renderer logic stays decoupled from version parsing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::version::ToolVersion;

/// Whether tasks can be configured lazily (`configureEach`).
pub const LAZY_TASK_CONFIGURATION: &str = "lazy-task-configuration";

/// Whether the configuration cache is available.
pub const CONFIGURATION_CACHE: &str = "configuration-cache";

/// Whether the Java toolchains DSL is available.
pub const JAVA_TOOLCHAINS_DSL: &str = "java-toolchains-dsl";

/// The set of optional behaviors a given build-tool version supports.
///
/// Resolution is a pure function of the version: no environment reads,
/// no hidden state. Versions above every known threshold support all
/// known capabilities, so unreleased tool versions resolve cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    flags: BTreeMap<&'static str, bool>,
}

impl CapabilitySet {
    /// Resolve the capabilities of a build-tool version.
    pub fn resolve(version: &ToolVersion) -> Self {
        let mut flags = BTreeMap::new();
        flags.insert(
            LAZY_TASK_CONFIGURATION,
            *version >= ToolVersion::from_parts(&[4, 9]),
        );
        flags.insert(
            CONFIGURATION_CACHE,
            *version >= ToolVersion::from_parts(&[6, 6]),
        );
        flags.insert(
            JAVA_TOOLCHAINS_DSL,
            *version >= ToolVersion::from_parts(&[6, 7]),
        );
        CapabilitySet { flags }
    }

    /// Look up a capability by name. `None` means the name is unknown.
    pub fn supports(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Whether tasks can be configured lazily.
    pub fn lazy_task_configuration(&self) -> bool {
        self.flags[LAZY_TASK_CONFIGURATION]
    }

    /// Iterate over all flags in deterministic (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.flags.iter().map(|(name, on)| (*name, *on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(raw: &str) -> CapabilitySet {
        CapabilitySet::resolve(&ToolVersion::parse(raw).unwrap())
    }

    #[test]
    fn test_lazy_task_configuration_threshold() {
        assert!(!caps("4.5").lazy_task_configuration());
        assert!(!caps("4.8.1").lazy_task_configuration());
        assert!(caps("4.9").lazy_task_configuration());
        assert!(caps("7.0").lazy_task_configuration());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let version = ToolVersion::parse("6.8.3").unwrap();
        assert_eq!(
            CapabilitySet::resolve(&version),
            CapabilitySet::resolve(&version)
        );
    }

    #[test]
    fn test_future_versions_support_everything() {
        let future = caps("99.0");
        assert!(future.iter().all(|(_, on)| on));
    }

    #[test]
    fn test_lookup_by_name() {
        let set = caps("6.6");
        assert_eq!(set.supports(CONFIGURATION_CACHE), Some(true));
        assert_eq!(set.supports(JAVA_TOOLCHAINS_DSL), Some(false));
        assert_eq!(set.supports("no-such-flag"), None);
    }

    #[test]
    fn test_equivalent_versions_resolve_equal() {
        assert_eq!(caps("5"), caps("5.0"));
    }
}
