use super::definition::{FieldItems, FormEdge, FormField, FormGraph, FormNode, Position};
use crate::api::{ApiFormDefinition, ApiGraphResponse, ApiSchemaField};
use ahash::AHashMap;
use tracing::{debug, info};

/// Number of columns used when the API omits node positions.
pub const GRID_COLUMNS: usize = 5;
/// Horizontal distance between grid columns.
pub const GRID_COLUMN_SPACING: f64 = 250.0;
/// Vertical distance between grid rows.
pub const GRID_ROW_SPACING: f64 = 150.0;

/// A trait for payload types that can be converted into a `FormGraph`.
///
/// The API response is the shipped implementation. Other payload formats
/// (fixtures, exports of a different backend) plug in by implementing this
/// trait; the resolver and the editor only ever see the resulting graph.
///
/// # Example
///
/// ```rust,no_run
/// use prefill::prelude::*;
///
/// struct Checklist { steps: Vec<String> }
///
/// impl IntoGraph for Checklist {
///     fn into_graph(self) -> FormGraph {
///         let nodes = self
///             .steps
///             .iter()
///             .enumerate()
///             .map(|(index, step)| FormNode {
///                 id: step.clone(),
///                 label: step.clone(),
///                 fields: vec![FormField::new("done", "Done", "boolean")],
///                 component_id: "checklist-step".to_string(),
///                 position: grid_position(index),
///             })
///             .collect();
///         let edges = self
///             .steps
///             .windows(2)
///             .enumerate()
///             .map(|(index, pair)| FormEdge {
///                 id: synthesize_edge_id(&pair[0], &pair[1], index),
///                 source: pair[0].clone(),
///                 target: pair[1].clone(),
///             })
///             .collect();
///         FormGraph { id: "checklist".to_string(), name: "Checklist".to_string(), nodes, edges }
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the payload and converts it into the canonical graph.
    fn into_graph(self) -> FormGraph;
}

/// Deterministic fallback placement for the node at `index`.
pub fn grid_position(index: usize) -> Position {
    Position {
        x: (index % GRID_COLUMNS) as f64 * GRID_COLUMN_SPACING,
        y: (index / GRID_COLUMNS) as f64 * GRID_ROW_SPACING,
    }
}

/// Edge id used when the payload carries none; unique within one load.
pub fn synthesize_edge_id(source: &str, target: &str, index: usize) -> String {
    format!("e{}-{}-{}", source, target, index)
}

fn project_field(key: &str, schema: &ApiSchemaField) -> FormField {
    FormField {
        id: key.to_string(),
        name: schema
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(key)
            .to_string(),
        field_type: schema.field_type.clone(),
        avantos_type: schema.avantos_type.clone(),
        format: schema.format.clone(),
        items: schema.items.as_ref().map(|items| FieldItems {
            enum_values: items.enum_values.clone(),
            item_type: items.item_type.clone(),
        }),
    }
}

fn project_fields(form: Option<&ApiFormDefinition>) -> Vec<FormField> {
    form.and_then(|f| f.field_schema.as_ref())
        .and_then(|schema| schema.properties.as_ref())
        .map(|properties| {
            properties
                .iter()
                .map(|(key, schema)| project_field(key, schema))
                .collect()
        })
        .unwrap_or_default()
}

impl IntoGraph for ApiGraphResponse {
    fn into_graph(self) -> FormGraph {
        let forms: AHashMap<&str, &ApiFormDefinition> =
            self.forms.iter().map(|f| (f.id.as_str(), f)).collect();

        let nodes: Vec<FormNode> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, api_node)| {
                let form = forms.get(api_node.data.component_id.as_str()).copied();
                if form.is_none() {
                    debug!(
                        node_id = %api_node.id,
                        component_id = %api_node.data.component_id,
                        "no form definition for node; it gets no fields"
                    );
                }
                FormNode {
                    id: api_node.id.clone(),
                    label: api_node.data.name.clone(),
                    fields: project_fields(form),
                    component_id: api_node.data.component_id.clone(),
                    position: api_node
                        .position
                        .map(|p| Position { x: p.x, y: p.y })
                        .unwrap_or_else(|| grid_position(index)),
                }
            })
            .collect();

        let edges: Vec<FormEdge> = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, api_edge)| FormEdge {
                id: api_edge
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| {
                        synthesize_edge_id(&api_edge.source, &api_edge.target, index)
                    }),
                source: api_edge.source,
                target: api_edge.target,
            })
            .collect();

        info!(
            graph_id = %self.id,
            nodes = nodes.len(),
            edges = edges.len(),
            "converted API payload into form graph"
        );

        FormGraph {
            id: self.id,
            name: self.name,
            nodes,
            edges,
        }
    }
}
