//! Project graph data model
//!
//! Nodes are identified by their path-qualified name: `:` for the root,
//! `:app` for a direct child, `:feature:auth` for a nested subproject.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Path of the root project
pub const ROOT_PATH: &str = ":";

/// Plugin build directory inside the external tool SDK
pub const PLUGIN_BUILD_SUBDIR: &str = "packages/flutter_tools/gradle";

/// Role a project plays in the build
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Root,
    #[value(alias = "app")]
    #[serde(alias = "app")]
    Application,
    #[value(alias = "lib")]
    #[serde(alias = "lib")]
    Library,
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRole::Root => write!(f, "root"),
            ProjectRole::Application => write!(f, "application"),
            ProjectRole::Library => write!(f, "library"),
        }
    }
}

/// SDK version bounds; each bound stays `None` until declared or defaulted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

impl SdkBounds {
    pub fn new(compile: u32, min: u32, target: u32) -> Self {
        Self {
            compile: Some(compile),
            min: Some(min),
            target: Some(target),
        }
    }
}

/// Packaging settings for one build type.
///
/// Passed through to the build executor untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTypeSettings {
    /// Reference to an externally defined signing configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_config: Option<String>,
    #[serde(default)]
    pub minify_enabled: bool,
    #[serde(default)]
    pub shrink_resources: bool,
}

/// Node fields that propagation rules may fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    CompileSdk,
    MinSdk,
    TargetSdk,
    Namespace,
    JvmTarget,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigField::CompileSdk => "sdk.compile",
            ConfigField::MinSdk => "sdk.min",
            ConfigField::TargetSdk => "sdk.target",
            ConfigField::Namespace => "namespace",
            ConfigField::JvmTarget => "jvm_target",
        };
        f.write_str(name)
    }
}

/// Record of a field that received an inherited default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultedField {
    pub field: ConfigField,
    pub rule: String,
}

/// A project in the configuration graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNode {
    /// Path-qualified identity (`:`, `:app`, `:feature:auth`)
    pub path: String,
    /// Last path segment; the declared project name for the root
    pub name: String,
    pub role: ProjectRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub sdk: SdkBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_target: Option<String>,
    /// Explicit evaluate-after declarations (project paths)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evaluation_depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub build_types: BTreeMap<String, BuildTypeSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaulted: Vec<DefaultedField>,
}

impl ProjectNode {
    /// Create the root project node
    pub fn root(name: impl Into<String>) -> Self {
        Self::bare(ROOT_PATH.to_string(), name.into(), ProjectRole::Root)
    }

    /// Create a subproject node; the name is the last segment of `path`
    pub fn new(path: impl Into<String>, role: ProjectRole) -> Self {
        let path = path.into();
        let name = path.rsplit(':').next().unwrap_or_default().to_string();
        Self::bare(path, name, role)
    }

    fn bare(path: String, name: String, role: ProjectRole) -> Self {
        Self {
            path,
            name,
            role,
            group: None,
            namespace: None,
            sdk: SdkBounds::default(),
            jvm_target: None,
            evaluation_depends_on: Vec::new(),
            build_types: BTreeMap::new(),
            output_dir: None,
            defaulted: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_sdk(mut self, sdk: SdkBounds) -> Self {
        self.sdk = sdk;
        self
    }

    pub fn with_jvm_target(mut self, jvm_target: impl Into<String>) -> Self {
        self.jvm_target = Some(jvm_target.into());
        self
    }

    pub fn depends_on(mut self, path: impl Into<String>) -> Self {
        self.evaluation_depends_on.push(path.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.role == ProjectRole::Root
    }

    /// Path of the parent project, `None` for the root
    pub fn parent_path(&self) -> Option<String> {
        if self.path == ROOT_PATH {
            return None;
        }
        match self.path.rfind(':') {
            Some(0) | None => Some(ROOT_PATH.to_string()),
            Some(idx) => Some(self.path[..idx].to_string()),
        }
    }

    /// Whether `field` currently holds a value
    pub fn is_set(&self, field: ConfigField) -> bool {
        match field {
            ConfigField::CompileSdk => self.sdk.compile.is_some(),
            ConfigField::MinSdk => self.sdk.min.is_some(),
            ConfigField::TargetSdk => self.sdk.target.is_some(),
            ConfigField::Namespace => self.namespace.as_deref().is_some_and(|ns| !ns.is_empty()),
            ConfigField::JvmTarget => self.jvm_target.is_some(),
        }
    }
}

/// Check that a project path is well formed: `:` followed by non-empty
/// segments that are usable as directory names.
pub fn validate_project_path(path: &str) -> Result<(), String> {
    let Some(rest) = path.strip_prefix(':') else {
        return Err("project paths start with ':'".to_string());
    };
    if rest.is_empty() {
        return Err("':' is reserved for the root project".to_string());
    }
    for segment in rest.split(':') {
        if segment.is_empty() {
            return Err("empty path segment".to_string());
        }
        if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
            return Err(format!("segment '{}' is not a valid directory name", segment));
        }
    }
    Ok(())
}

/// Where a tool location came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolProvenance {
    FileConfig,
    Environment,
}

impl fmt::Display for ToolProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolProvenance::FileConfig => write!(f, "file"),
            ToolProvenance::Environment => write!(f, "environment"),
        }
    }
}

/// Resolved location of the external build-tool SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLocation {
    pub path: PathBuf,
    pub provenance: ToolProvenance,
}

impl ToolLocation {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the plugin build that subproject definitions load
    pub fn plugin_build_dir(&self) -> PathBuf {
        self.path.join(PLUGIN_BUILD_SUBDIR)
    }
}

/// `dependent` must not be evaluated before `dependency`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationEdge {
    pub dependent: String,
    pub dependency: String,
}

impl EvaluationEdge {
    pub fn new(dependent: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            dependent: dependent.into(),
            dependency: dependency.into(),
        }
    }
}

impl fmt::Display for EvaluationEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.dependent, self.dependency)
    }
}
