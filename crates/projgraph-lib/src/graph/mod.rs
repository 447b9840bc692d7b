//! # Graph Module
//!
//! Configuration graph for a root project and its subprojects.
//!
//! ## Modules
//!
//! - [`locator`] - Layered lookup of the external build-tool SDK
//! - [`directories`] - Collision-free output directory planning
//! - [`ordering`] - Evaluate-after constraints with cycle detection
//! - [`propagation`] - Guarded defaults that never overwrite explicit values
//! - [`tree`] - Project tree description (`projgraph.toml`)
//! - [`project_graph`] - Composition of the steps above into a frozen graph
//! - [`materialize`] - Filesystem side of the directory plan

use std::path::PathBuf;
use thiserror::Error;

pub mod directories;
pub mod locator;
pub mod materialize;
pub mod ordering;
pub mod project_graph;
pub mod propagation;
pub mod tree;

pub use directories::{DirectoryPlan, DirectoryPlanner};
pub use locator::ExternalToolLocator;
pub use materialize::{DirectoryMaterializer, FsMaterializer, clean_build_root};
pub use ordering::{OrderConstraintResolver, OrderConstraints};
pub use project_graph::{GraphReport, GraphSettings, ProjectGraph};
pub use propagation::{
    DefaultConfigPropagator, FieldDefault, GraphDefaults, Predicate, PropagationRule,
};
pub use tree::ProjectTree;

/// Fatal configuration errors. Any of these invalidates the whole build attempt.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(
        "External tool location is not configured: add `{key}=<path>` to {} or set the {env_var} environment variable",
        .file.display()
    )]
    ConfigurationMissing {
        file: PathBuf,
        key: String,
        env_var: String,
    },

    #[error("Failed to read tool configuration {}: {source}", .path.display())]
    ToolConfigUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Duplicate output directory {}: claimed by {first} and {second}", .path.display())]
    DuplicateOutputDirectory {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Evaluation cycle detected: {}", .nodes.join(" → "))]
    EvaluationCycle { nodes: Vec<String> },

    #[error("Project declared more than once: {path}")]
    DuplicateProject { path: String },

    #[error("Project {path} has no declared parent {parent}")]
    MissingParent { path: String, parent: String },

    #[error("Invalid project path '{path}': {reason}")]
    InvalidProjectPath { path: String, reason: String },

    #[error("Unknown project {path} referenced by {referenced_by}")]
    UnknownProject { path: String, referenced_by: String },

    #[error("More than one application project: {first} and {second}")]
    MultipleApplications { first: String, second: String },

    #[error("Failed to read project tree {}: {source}", .path.display())]
    TreeRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse project tree {}: {source}", .path.display())]
    TreeParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to materialize {}: {source}", .path.display())]
    Materialization {
        path: PathBuf,
        source: std::io::Error,
    },
}
