//! Drydock - an integration-test harness for compiler plugins.
//!
//! This crate provides the core library functionality for drydock:
//! resolving build-tool versions into capability flags, rendering
//! version-appropriate configuration scripts, driving the external build
//! tool in isolated scratch projects, and classifying captured output.

pub mod core;
pub mod harness;
pub mod invoke;
pub mod ops;
pub mod util;

pub use crate::core::{CapabilitySet, InvocationConfig, ScriptBuffer, ToolVersion};
pub use crate::harness::{Fixture, Harness, ScratchProject, ARRAY_EQUALS_MARKER};
pub use crate::invoke::{classify, InvocationResult, LaunchError, Launcher, Outcome};
pub use crate::util::HarnessConfig;
