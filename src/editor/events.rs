use crate::graph::Position;

/// Change events emitted by the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    NodeMoved { node_id: String, position: Position },
    /// A user-drawn connection; cycles are not rejected.
    EdgeConnected { source: String, target: String },
    EdgeRemoved { edge_id: String },
    NodeSelected { node_id: String },
    SelectionCleared,
}
