use serde::{Deserialize, Serialize};

/// The canonical form graph the editor and resolver operate on.
/// This is the target structure of any payload conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormGraph {
    pub id: String,
    pub name: String,
    pub nodes: Vec<FormNode>,
    pub edges: Vec<FormEdge>,
}

impl FormGraph {
    pub fn node(&self, node_id: &str) -> Option<&FormNode> {
        find_node(&self.nodes, node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut FormNode> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    pub fn field(&self, node_id: &str, field_id: &str) -> Option<&FormField> {
        self.node(node_id).and_then(|n| n.field(field_id))
    }
}

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A form instance in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormNode {
    pub id: String,
    pub label: String,
    pub fields: Vec<FormField>,
    /// The form definition this node was created from.
    pub component_id: String,
    pub position: Position,
}

impl FormNode {
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

/// A field of a form, unique by `id` within its node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avantos_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldItems>,
}

impl FormField {
    /// A plain field with only id, display name and type.
    pub fn new(id: &str, name: &str, field_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            field_type: field_type.to_string(),
            avantos_type: None,
            format: None,
            items: None,
        }
    }
}

/// Enumeration metadata of array fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldItems {
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

/// `source` feeds `target`; `target` depends on `source`.
/// Parallel edges and self-loops are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

pub fn find_node<'a>(nodes: &'a [FormNode], node_id: &str) -> Option<&'a FormNode> {
    nodes.iter().find(|n| n.id == node_id)
}
