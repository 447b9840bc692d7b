//! Graph composition
//!
//! Build order is fixed: tool lookup, node construction, directory planning,
//! ordering constraints, then default propagation per node in evaluation
//! order. The result is frozen; there are no mutating methods.

use super::GraphError;
use super::directories::DirectoryPlanner;
use super::locator::{
    DEFAULT_ENV_VAR, DEFAULT_PROPERTIES_FILE, DEFAULT_PROPERTY_KEY, ExternalToolLocator,
};
use super::materialize::DirectoryMaterializer;
use super::ordering::OrderConstraintResolver;
use super::propagation::DefaultConfigPropagator;
use super::tree::{DEFAULT_TREE_FILE, ProjectTree};
use crate::primitives::{
    EvaluationEdge, ProjectNode, ProjectRole, ROOT_PATH, ToolLocation, validate_project_path,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Where the graph inputs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSettings {
    pub project_dir: PathBuf,
    /// Tree file, relative to `project_dir` unless absolute
    pub tree_file: PathBuf,
    /// Properties file, relative to `project_dir` unless absolute
    pub properties_file: PathBuf,
    pub property_key: String,
    pub sdk_env_var: String,
}

impl GraphSettings {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            tree_file: PathBuf::from(DEFAULT_TREE_FILE),
            properties_file: PathBuf::from(DEFAULT_PROPERTIES_FILE),
            property_key: DEFAULT_PROPERTY_KEY.to_string(),
            sdk_env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }

    pub fn tree_path(&self) -> PathBuf {
        self.project_dir.join(&self.tree_file)
    }

    pub fn properties_path(&self) -> PathBuf {
        self.project_dir.join(&self.properties_file)
    }

    pub fn locator(&self) -> ExternalToolLocator {
        ExternalToolLocator::new(self.property_key.clone())
    }
}

/// Fully resolved configuration graph
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    tool: Arc<ToolLocation>,
    build_root: PathBuf,
    /// Declaration order, root first
    nodes: Vec<ProjectNode>,
    index: HashMap<String, usize>,
    edges: BTreeSet<EvaluationEdge>,
    order: Vec<String>,
}

/// Serializable view handed to the build executor
#[derive(Debug, Serialize)]
pub struct GraphReport<'a> {
    pub tool: &'a ToolLocation,
    pub plugin_build_dir: PathBuf,
    pub build_root: &'a Path,
    /// Nodes in evaluation order
    pub projects: Vec<&'a ProjectNode>,
    pub edges: Vec<&'a EvaluationEdge>,
}

impl ProjectGraph {
    /// Resolve the tool location, then load and build the tree from disk
    pub fn load(settings: &GraphSettings) -> Result<Self, GraphError> {
        let tool = settings
            .locator()
            .resolve(&settings.properties_path(), &settings.sdk_env_var)?;
        Self::load_with_tool(settings, Arc::new(tool))
    }

    /// Build from disk with an already resolved tool location
    pub fn load_with_tool(
        settings: &GraphSettings,
        tool: Arc<ToolLocation>,
    ) -> Result<Self, GraphError> {
        let tree = ProjectTree::load(&settings.tree_path())?;
        Self::build(&tree, &settings.project_dir, tool)
    }

    pub fn build(
        tree: &ProjectTree,
        project_dir: &Path,
        tool: Arc<ToolLocation>,
    ) -> Result<Self, GraphError> {
        debug!(tool = %tool.path.display(), provenance = %tool.provenance, "building project graph");

        let root = tree.root_node();
        let children = tree.subproject_nodes();
        validate_nodes(&children)?;

        let build_root = tree.build_root(project_dir);
        let plan = DirectoryPlanner::new().plan(&root, &children, &build_root)?;

        let mut nodes = Vec::with_capacity(children.len() + 1);
        nodes.push(root);
        nodes.extend(children);
        for node in &mut nodes {
            node.output_dir = plan.get(&node.path).map(Path::to_path_buf);
        }

        let constraints = OrderConstraintResolver::new().constrain(&nodes)?;

        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.path.clone(), i))
            .collect();

        let propagator = DefaultConfigPropagator::from_defaults(&tree.defaults);
        for path in &constraints.order {
            let i = index[path];
            nodes[i] = propagator.propagate(nodes[i].clone());
        }

        info!(
            projects = nodes.len(),
            edges = constraints.edges.len(),
            build_root = %build_root.display(),
            "project graph resolved"
        );

        Ok(Self {
            tool,
            build_root,
            nodes,
            index,
            edges: constraints.edges,
            order: constraints.order,
        })
    }

    /// Shared handle to the tool location
    pub fn tool_location(&self) -> Arc<ToolLocation> {
        Arc::clone(&self.tool)
    }

    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    pub fn root(&self) -> &ProjectNode {
        &self.nodes[0]
    }

    pub fn node(&self, path: &str) -> Option<&ProjectNode> {
        self.index.get(path).map(|&i| &self.nodes[i])
    }

    /// Nodes in declaration order, root first
    pub fn nodes(&self) -> &[ProjectNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<EvaluationEdge> {
        &self.edges
    }

    /// Nodes with every dependency ahead of its dependents
    pub fn evaluation_order(&self) -> impl Iterator<Item = &ProjectNode> {
        self.order.iter().map(|p| &self.nodes[self.index[p]])
    }

    /// Projects whose work must finish before `path` may start
    pub fn ready_after(&self, path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.dependent == path)
            .map(|e| e.dependency.as_str())
            .collect()
    }

    pub fn report(&self) -> GraphReport<'_> {
        GraphReport {
            tool: &self.tool,
            plugin_build_dir: self.tool.plugin_build_dir(),
            build_root: &self.build_root,
            projects: self.evaluation_order().collect(),
            edges: self.edges.iter().collect(),
        }
    }

    /// Create every planned output directory, root first
    pub fn materialize(
        &self,
        fs: &dyn DirectoryMaterializer,
    ) -> Result<Vec<PathBuf>, GraphError> {
        let mut created = Vec::with_capacity(self.nodes.len());
        for dir in self.nodes.iter().filter_map(|n| n.output_dir.as_deref()) {
            fs.create_dir_all(dir).map_err(|e| GraphError::Materialization {
                path: dir.to_path_buf(),
                source: e,
            })?;
            created.push(dir.to_path_buf());
        }
        debug!(directories = created.len(), "output directories materialized");
        Ok(created)
    }
}

/// Identity and parent invariants for subprojects
fn validate_nodes(children: &[ProjectNode]) -> Result<(), GraphError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(children.len() + 1);
    seen.insert(ROOT_PATH);

    for node in children {
        validate_project_path(&node.path).map_err(|reason| GraphError::InvalidProjectPath {
            path: node.path.clone(),
            reason,
        })?;
        if node.role == ProjectRole::Root {
            return Err(GraphError::InvalidProjectPath {
                path: node.path.clone(),
                reason: "only the root project may have role 'root'".to_string(),
            });
        }
        if !seen.insert(node.path.as_str()) {
            return Err(GraphError::DuplicateProject {
                path: node.path.clone(),
            });
        }
    }

    for node in children {
        if let Some(parent) = node.parent_path() {
            if !seen.contains(parent.as_str()) {
                return Err(GraphError::MissingParent {
                    path: node.path.clone(),
                    parent,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("project_graph.test.rs");
}
