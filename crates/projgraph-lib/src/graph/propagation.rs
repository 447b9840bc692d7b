//! Guarded default propagation
//!
//! A rule fills a field only when its predicate matches and the field is
//! still unset. Explicit values are never overwritten, and within one pass
//! the first rule to fill a field wins.

use crate::primitives::{ConfigField, DefaultedField, ProjectNode, ProjectRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Graph-wide defaults, `[defaults]` in the project tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphDefaults {
    pub compile_sdk: u32,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub jvm_target: String,
    /// Owner group -> namespace given to libraries of that group
    pub namespaces: BTreeMap<String, String>,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            compile_sdk: 36,
            min_sdk: 24,
            target_sdk: 35,
            jvm_target: "17".to_string(),
            namespaces: BTreeMap::new(),
        }
    }
}

impl GraphDefaults {
    /// The ordered rule table for these defaults
    pub fn rules(&self) -> Vec<PropagationRule> {
        let library = || Predicate::Role(ProjectRole::Library);
        let mut rules = vec![
            PropagationRule::new(
                "library-compile-sdk",
                library(),
                FieldDefault::CompileSdk(self.compile_sdk),
            ),
            PropagationRule::new(
                "library-min-sdk",
                library(),
                FieldDefault::MinSdk(self.min_sdk),
            ),
            PropagationRule::new(
                "library-target-sdk",
                library(),
                FieldDefault::TargetSdk(self.target_sdk),
            ),
        ];

        rules.extend(self.namespaces.iter().map(|(group, namespace)| {
            PropagationRule::new(
                format!("group-namespace:{group}"),
                Predicate::RoleInGroup {
                    role: ProjectRole::Library,
                    group: group.clone(),
                },
                FieldDefault::Namespace(namespace.clone()),
            )
        }));

        rules.push(PropagationRule::new(
            "subproject-jvm-target",
            Predicate::Subproject,
            FieldDefault::JvmTarget(self.jvm_target.clone()),
        ));

        rules
    }
}

/// Condition over a node's role and group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Role(ProjectRole),
    /// Any project except the root
    Subproject,
    RoleInGroup { role: ProjectRole, group: String },
}

impl Predicate {
    pub fn matches(&self, node: &ProjectNode) -> bool {
        match self {
            Predicate::Role(role) => node.role == *role,
            Predicate::Subproject => !node.is_root(),
            Predicate::RoleInGroup { role, group } => {
                node.role == *role && node.group.as_deref() == Some(group.as_str())
            }
        }
    }
}

/// Field to fill and the value to fill it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    CompileSdk(u32),
    MinSdk(u32),
    TargetSdk(u32),
    Namespace(String),
    JvmTarget(String),
}

impl FieldDefault {
    pub fn field(&self) -> ConfigField {
        match self {
            FieldDefault::CompileSdk(_) => ConfigField::CompileSdk,
            FieldDefault::MinSdk(_) => ConfigField::MinSdk,
            FieldDefault::TargetSdk(_) => ConfigField::TargetSdk,
            FieldDefault::Namespace(_) => ConfigField::Namespace,
            FieldDefault::JvmTarget(_) => ConfigField::JvmTarget,
        }
    }

    fn write(&self, node: &mut ProjectNode) {
        match self {
            FieldDefault::CompileSdk(v) => node.sdk.compile = Some(*v),
            FieldDefault::MinSdk(v) => node.sdk.min = Some(*v),
            FieldDefault::TargetSdk(v) => node.sdk.target = Some(*v),
            FieldDefault::Namespace(v) => node.namespace = Some(v.clone()),
            FieldDefault::JvmTarget(v) => node.jvm_target = Some(v.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationRule {
    pub name: String,
    pub predicate: Predicate,
    pub default: FieldDefault,
}

impl PropagationRule {
    pub fn new(name: impl Into<String>, predicate: Predicate, default: FieldDefault) -> Self {
        Self {
            name: name.into(),
            predicate,
            default,
        }
    }
}

/// Apply `rules` in order and return the updated node
pub fn propagate(mut node: ProjectNode, rules: &[PropagationRule]) -> ProjectNode {
    for rule in rules {
        if !rule.predicate.matches(&node) {
            continue;
        }
        let field = rule.default.field();
        if node.is_set(field) {
            trace!(project = %node.path, %field, rule = %rule.name, "field already set, keeping");
            continue;
        }
        rule.default.write(&mut node);
        debug!(project = %node.path, %field, rule = %rule.name, "applied default");
        node.defaulted.push(DefaultedField {
            field,
            rule: rule.name.clone(),
        });
    }
    node
}

/// Holds the rule table for one graph build
#[derive(Debug, Clone, Default)]
pub struct DefaultConfigPropagator {
    rules: Vec<PropagationRule>,
}

impl DefaultConfigPropagator {
    pub fn new(rules: Vec<PropagationRule>) -> Self {
        Self { rules }
    }

    pub fn from_defaults(defaults: &GraphDefaults) -> Self {
        Self::new(defaults.rules())
    }

    pub fn rules(&self) -> &[PropagationRule] {
        &self.rules
    }

    pub fn propagate(&self, node: ProjectNode) -> ProjectNode {
        propagate(node, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    include!("propagation.test.rs");
}
