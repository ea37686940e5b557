//! Rendering of build-tool configuration scripts.
//!
//! Two artifacts are produced per invocation: a settings script that pins
//! the plugin under test to an exact version and declares where to resolve
//! it from, and a build script assembled through [`ScriptBuffer`], an
//! accumulator that tracks which optional augmentations have already been
//! applied so repeated setup calls cannot double-append them.
//!
//! All conditional output keys off [`CapabilitySet`] flags; this module
//! never compares raw versions.

use std::collections::BTreeSet;
use std::path::Path;

use url::Url;

use crate::core::capability::CapabilitySet;

/// Parameters for one build-tool invocation.
///
/// Built fresh per invocation and never shared between concurrent runs.
#[derive(Debug, Clone)]
pub struct InvocationConfig {
    /// Identifier of the plugin under test, matched exactly.
    pub plugin_id: String,
    /// Version the plugin is pinned to.
    pub plugin_version: String,
    /// Repository the plugin is resolved from.
    pub plugin_repository: Url,
    /// Additional plugin repositories, declared after the primary one.
    pub extra_repositories: Vec<Url>,
    /// Extra resolution-strategy rules, spliced verbatim into the
    /// `eachPlugin` block after the pinning rule.
    pub extra_resolution_rules: Vec<String>,
    /// Capabilities of the target tool version.
    pub capabilities: CapabilitySet,
}

impl InvocationConfig {
    /// Create a config with no extra repositories or rules.
    pub fn new(
        plugin_id: impl Into<String>,
        plugin_version: impl Into<String>,
        plugin_repository: Url,
        capabilities: CapabilitySet,
    ) -> Self {
        InvocationConfig {
            plugin_id: plugin_id.into(),
            plugin_version: plugin_version.into(),
            plugin_repository,
            extra_repositories: Vec::new(),
            extra_resolution_rules: Vec::new(),
            capabilities,
        }
    }

    /// Add an extra plugin repository.
    pub fn with_extra_repository(mut self, url: Url) -> Self {
        self.extra_repositories.push(url);
        self
    }

    /// Add an extra resolution-strategy rule.
    pub fn with_resolution_rule(mut self, rule: impl Into<String>) -> Self {
        self.extra_resolution_rules.push(rule.into());
        self
    }

    /// Render the settings script.
    ///
    /// Output is deterministic: the same config renders byte-identical
    /// text, so scripts can serve as reproducible test fixtures.
    pub fn render_settings(&self) -> String {
        let mut out = String::new();
        out.push_str("pluginManagement {\n");
        out.push_str("    repositories {\n");
        out.push_str(&format!(
            "        maven {{ url = uri(\"{}\") }}\n",
            self.plugin_repository
        ));
        for repo in &self.extra_repositories {
            out.push_str(&format!("        maven {{ url = uri(\"{}\") }}\n", repo));
        }
        out.push_str("    }\n");
        out.push_str("    resolutionStrategy {\n");
        out.push_str("        eachPlugin {\n");
        out.push_str(&format!(
            "            if (requested.id.id == \"{}\") {{\n",
            self.plugin_id
        ));
        out.push_str(&format!(
            "                useVersion(\"{}\")\n",
            self.plugin_version
        ));
        out.push_str("            }\n");
        for rule in &self.extra_resolution_rules {
            out.push_str(&format!("            {}\n", rule));
        }
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n");
        out
    }
}

/// Identifier for a build-script augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Augmentation {
    /// Declare the analysis library the plugin loads its checks from.
    AnalysisDependency,
    /// Fork the compiler with an alternate Java home.
    ForkHome,
    /// Prepend a forked compiler onto the boot classpath (legacy JVMs).
    LegacyBootclasspath,
}

impl Augmentation {
    /// Stable name, used in logs and reports.
    pub fn id(&self) -> &'static str {
        match self {
            Augmentation::AnalysisDependency => "analysis-dependency",
            Augmentation::ForkHome => "fork-home",
            Augmentation::LegacyBootclasspath => "legacy-bootclasspath",
        }
    }
}

/// An accumulating build-script buffer.
///
/// Each augmentation records itself in an applied set; re-applying one
/// that is already present is a no-op, which guards against duplicate
/// blocks when setup runs more than once in a single test lifecycle.
#[derive(Debug, Clone)]
pub struct ScriptBuffer {
    text: String,
    applied: BTreeSet<Augmentation>,
}

impl ScriptBuffer {
    /// Start a build script that applies the plugin under test to a
    /// plain Java project.
    pub fn base(plugin_id: &str) -> Self {
        let mut text = String::new();
        text.push_str("plugins {\n");
        text.push_str("    java\n");
        text.push_str(&format!("    id(\"{}\")\n", plugin_id));
        text.push_str("}\n");
        text.push('\n');
        text.push_str("repositories {\n");
        text.push_str("    mavenCentral()\n");
        text.push_str("}\n");
        ScriptBuffer {
            text,
            applied: BTreeSet::new(),
        }
    }

    /// The rendered script text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether an augmentation has already been applied.
    pub fn is_applied(&self, augmentation: Augmentation) -> bool {
        self.applied.contains(&augmentation)
    }

    /// Pin the analysis library the plugin resolves its checks from.
    ///
    /// Returns `true` if the block was appended, `false` if it was
    /// already present.
    pub fn apply_analysis_dependency(&mut self, coordinate: &str) -> bool {
        if !self.applied.insert(Augmentation::AnalysisDependency) {
            return false;
        }
        self.text.push('\n');
        self.text.push_str("dependencies {\n");
        self.text
            .push_str(&format!("    \"errorprone\"(\"{}\")\n", coordinate));
        self.text.push_str("}\n");
        true
    }

    /// Fork compilation with an alternate Java home.
    ///
    /// Returns `true` if the block was appended, `false` if it was
    /// already present.
    pub fn apply_fork_home(&mut self, java_home: &Path, capabilities: &CapabilitySet) -> bool {
        if !self.applied.insert(Augmentation::ForkHome) {
            return false;
        }
        let configure_each = configure_each(capabilities);
        self.text.push('\n');
        self.text.push_str(&format!(
            "tasks.withType<JavaCompile>(){} {{\n",
            configure_each
        ));
        self.text.push_str("    options.isFork = true\n");
        self.text.push_str(&format!(
            "    options.forkOptions.javaHome = File(\"{}\")\n",
            script_path(java_home)
        ));
        self.text.push_str("}\n");
        true
    }

    /// Prepend a forked compiler onto the boot classpath.
    ///
    /// Only applies when the injected compiler major version is 8; newer
    /// compilers load the checks through the standard plugin mechanism.
    /// The coordinate names the forked-compiler dependency to resolve.
    /// Returns `true` if the block was appended.
    pub fn apply_legacy_bootclasspath(
        &mut self,
        compiler_major: u32,
        coordinate: &str,
        capabilities: &CapabilitySet,
    ) -> bool {
        if compiler_major != 8 {
            return false;
        }
        if !self.applied.insert(Augmentation::LegacyBootclasspath) {
            return false;
        }
        let configure_each = configure_each(capabilities);
        self.text.push('\n');
        self.text.push_str("val forkedJavac by configurations.creating\n");
        self.text.push_str("dependencies {\n");
        self.text
            .push_str(&format!("    forkedJavac(\"{}\")\n", coordinate));
        self.text.push_str("}\n");
        self.text.push_str(&format!(
            "tasks.withType<JavaCompile>(){} {{\n",
            configure_each
        ));
        self.text
            .push_str("    if (options.forkOptions.javaHome == null) {\n");
        self.text.push_str("        inputs.files(forkedJavac)\n");
        self.text.push_str("        options.isFork = true\n");
        self.text.push_str("        doFirst {\n");
        self.text.push_str(
            "            options.forkOptions.jvmArgs!!.add(\"-Xbootclasspath/p:${forkedJavac.asPath}\")\n",
        );
        self.text.push_str("        }\n");
        self.text.push_str("    }\n");
        self.text.push_str("}\n");
        true
    }
}

fn configure_each(capabilities: &CapabilitySet) -> &'static str {
    if capabilities.lazy_task_configuration() {
        ".configureEach"
    } else {
        ""
    }
}

/// Paths in scripts always use forward slashes, whatever the host OS.
fn script_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
