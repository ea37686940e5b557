//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Drydock - an integration-test harness for compiler plugins
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved tool version and its capabilities
    Probe(ProbeArgs),

    /// Render the invocation scripts without running anything
    Render(RenderArgs),

    /// Scaffold a scratch project, run the tool once, classify the result
    Run(RunArgs),

    /// Run the end-to-end verification scenarios
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Overrides shared by every invocation-shaped command.
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Tool version under test (skips probing the launcher)
    #[arg(long)]
    pub tool_version: Option<String>,

    /// Path to the build-tool launcher executable
    #[arg(long)]
    pub launcher: Option<PathBuf>,

    /// Identifier of the plugin under test
    #[arg(long)]
    pub plugin_id: Option<String>,

    /// Version the plugin is pinned to
    #[arg(long)]
    pub plugin_version: Option<String>,

    /// Repository URL the plugin is resolved from
    #[arg(long)]
    pub repository: Option<String>,

    /// Alternate Java home used to fork compilation
    #[arg(long)]
    pub java_home: Option<PathBuf>,

    /// Major version of the Java compiler the build runs on
    #[arg(long)]
    pub compiler_major: Option<u32>,
}

#[derive(Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Extra plugin repository URL (repeatable)
    #[arg(long = "extra-repository")]
    pub extra_repositories: Vec<String>,

    /// Extra resolution-strategy rule, spliced in verbatim (repeatable)
    #[arg(long = "resolution-rule")]
    pub resolution_rules: Vec<String>,

    /// Print only one of the scripts
    #[arg(long, value_enum)]
    pub only: Option<ScriptKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptKind {
    Settings,
    Build,
}

#[derive(Args)]
pub struct RunArgs {
    /// Fixture source to place into the scratch project
    #[arg(long, value_enum)]
    pub fixture: FixtureKind,

    /// Task names passed to the tool, in order
    #[arg(default_value = "build")]
    pub tasks: Vec<String>,

    /// Expected failure marker, overriding the fixture's own
    #[arg(long)]
    pub marker: Option<String>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FixtureKind {
    /// Source that suppresses the diagnostic; the build must pass
    Suppressing,
    /// Source that triggers the diagnostic; the build must fail
    Triggering,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Task names to run in each scenario
    #[arg(default_value = "build")]
    pub tasks: Vec<String>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
