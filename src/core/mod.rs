//! Core data structures for drydock.
//!
//! This module contains the foundational types of the harness:
//! - Version identifiers and their total ordering
//! - Capability flags resolved from versions
//! - Invocation configuration and script rendering

pub mod capability;
pub mod descriptor;
pub mod version;

pub use capability::CapabilitySet;
pub use descriptor::{Augmentation, InvocationConfig, ScriptBuffer};
pub use version::{ToolVersion, VersionParseError};
