use crate::graph::{FormField, FormNode, find_node};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source node id shared by all global candidates.
pub const GLOBAL_SOURCE_ID: &str = "global";

/// Where a prefill value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Form,
    Global,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Form => write!(f, "form"),
            SourceKind::Global => write!(f, "global"),
        }
    }
}

/// Distance of a form source from the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// One edge away.
    Direct,
    /// Only reachable through two or more edges.
    Transitive,
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyType::Direct => write!(f, "direct"),
            DependencyType::Transitive => write!(f, "transitive"),
        }
    }
}

/// A candidate source for a target field. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillOption {
    pub id: String,
    pub label: String,
    pub source_node_id: String,
    pub source_field_id: String,
    #[serde(rename = "sourceType")]
    pub source_kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<DependencyType>,
}

impl PrefillOption {
    /// Candidate for a field of an upstream form node.
    pub fn form(node: &FormNode, field: &FormField, dependency: DependencyType) -> Self {
        Self {
            id: format!("{}.{}", node.id, field.id),
            label: format!("{} - {}", node.label, field.name),
            source_node_id: node.id.clone(),
            source_field_id: field.id.clone(),
            source_kind: SourceKind::Form,
            dependency: Some(dependency),
        }
    }

    /// Candidate for a graph-independent global value.
    pub fn global(key: &str, label: &str) -> Self {
        Self {
            id: format!("{}.{}", GLOBAL_SOURCE_ID, key),
            label: label.to_string(),
            source_node_id: GLOBAL_SOURCE_ID.to_string(),
            source_field_id: key.to_string(),
            source_kind: SourceKind::Global,
            dependency: None,
        }
    }
}

/// The chosen source of one target field.
///
/// Labels are captured when the binding is made and are not refreshed if the
/// source is renamed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillBinding {
    pub source_node_id: String,
    pub source_field_id: String,
    #[serde(rename = "sourceType")]
    pub source_kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_node_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field_label: Option<String>,
}

impl PrefillBinding {
    /// Binds to `option`, looking up display labels in `nodes`.
    pub fn from_option(option: &PrefillOption, nodes: &[FormNode]) -> Self {
        let source_node = find_node(nodes, &option.source_node_id);
        Self {
            source_node_id: option.source_node_id.clone(),
            source_field_id: option.source_field_id.clone(),
            source_kind: option.source_kind,
            source_node_label: source_node.map(|n| n.label.clone()),
            source_field_label: source_node
                .and_then(|n| n.field(&option.source_field_id))
                .map(|f| f.name.clone()),
        }
    }

    /// Whether this binding points at `option`.
    pub fn matches(&self, option: &PrefillOption) -> bool {
        self.source_node_id == option.source_node_id
            && self.source_field_id == option.source_field_id
            && self.source_kind == option.source_kind
    }

    /// `"<node> -> <field> (<kind>)"`, falling back to ids for missing labels.
    pub fn describe(&self) -> String {
        format!(
            "{} -> {} ({})",
            self.source_node_label.as_deref().unwrap_or(&self.source_node_id),
            self.source_field_label.as_deref().unwrap_or(&self.source_field_id),
            self.source_kind
        )
    }
}
