//! Evaluation ordering between projects
//!
//! Every subproject that is not the application is evaluated after the
//! application, so library configuration can observe what the application
//! already claimed. Explicit `evaluation_depends_on` declarations add further
//! edges. The whole edge set is checked for cycles once per build.

use super::GraphError;
use crate::primitives::{EvaluationEdge, ProjectNode, ProjectRole};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};
use tracing::{debug, trace};

/// Validated edge set plus the evaluation order it implies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderConstraints {
    pub edges: BTreeSet<EvaluationEdge>,
    /// Project paths, dependencies before dependents
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderConstraintResolver;

impl OrderConstraintResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build and validate the evaluate-after edges for `nodes`
    pub fn constrain(&self, nodes: &[ProjectNode]) -> Result<OrderConstraints, GraphError> {
        let application = find_application(nodes)?;
        let mut graph = ConstraintGraph::new();
        for node in nodes {
            graph.add_node(&node.path);
        }

        if let Some(app) = application {
            for node in nodes
                .iter()
                .filter(|n| !n.is_root() && n.role != ProjectRole::Application)
            {
                graph.add_constraint(&node.path, &app.path)?;
            }
        }

        for node in nodes {
            for dependency in &node.evaluation_depends_on {
                graph.add_constraint(&node.path, dependency)?;
            }
        }

        if let Some(cycle) = graph.find_cycle() {
            return Err(GraphError::EvaluationCycle { nodes: cycle });
        }

        let order = graph.evaluation_order();
        debug!(edges = graph.edges.len(), "evaluation constraints resolved");

        Ok(OrderConstraints {
            edges: graph.edges,
            order,
        })
    }
}

fn find_application(nodes: &[ProjectNode]) -> Result<Option<&ProjectNode>, GraphError> {
    let mut apps = nodes.iter().filter(|n| n.role == ProjectRole::Application);
    let first = apps.next();
    if let (Some(first), Some(second)) = (first, apps.next()) {
        return Err(GraphError::MultipleApplications {
            first: first.path.clone(),
            second: second.path.clone(),
        });
    }
    Ok(first)
}

/// Directed graph with edges from dependency to dependent
struct ConstraintGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    edges: BTreeSet<EvaluationEdge>,
}

impl ConstraintGraph {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            edges: BTreeSet::new(),
        }
    }

    fn add_node(&mut self, path: &str) {
        if !self.node_map.contains_key(path) {
            let idx = self.graph.add_node(path.to_string());
            self.node_map.insert(path.to_string(), idx);
        }
    }

    fn add_constraint(&mut self, dependent: &str, dependency: &str) -> Result<(), GraphError> {
        if dependent == dependency {
            return Err(GraphError::EvaluationCycle {
                nodes: vec![dependent.to_string()],
            });
        }
        let (Some(&from), Some(&to)) = (self.node_map.get(dependency), self.node_map.get(dependent))
        else {
            return Err(GraphError::UnknownProject {
                path: dependency.to_string(),
                referenced_by: dependent.to_string(),
            });
        };

        if self.edges.insert(EvaluationEdge::new(dependent, dependency)) {
            trace!(dependent, dependency, "evaluation edge");
            self.graph.add_edge(from, to, ());
        }
        Ok(())
    }

    /// Members of the first non-trivial strongly connected component,
    /// in declaration order
    fn find_cycle(&self) -> Option<Vec<String>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .find(|component| component.len() > 1)
            .map(|mut component| {
                component.sort();
                component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect()
            })
    }

    /// Kahn's algorithm; among ready nodes the earliest declared goes first
    fn evaluation_order(&self) -> Vec<String> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, petgraph::Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(self.graph[idx].clone());
            for next in self.graph.neighbors(idx) {
                in_degree[next.index()] -= 1;
                if in_degree[next.index()] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    include!("ordering.test.rs");
}
