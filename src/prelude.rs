//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load a graph, resolve prefill candidates
//! and drive the editor.
//!
//! # Example
//!
//! ```rust,no_run
//! use prefill::prelude::*;
//!
//! # fn run_example() -> Result<(), FetchError> {
//! let body = std::fs::read_to_string("graph.json").unwrap_or_default();
//! let graph = parse_graph_response(&body)?.into_graph();
//!
//! let resolver = PrefillResolver::default();
//! for node in &graph.nodes {
//!     for field in &node.fields {
//!         let candidates = resolver.resolve(node, field, &graph.nodes, &graph.edges);
//!         println!("{}.{}: {} candidates", node.id, field.id, candidates.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Loading
pub use crate::api::{ApiGraphResponse, ClientConfig, GraphClient, parse_graph_response};

// Graph model
pub use crate::graph::{
    FormEdge, FormField, FormGraph, FormNode, IntoGraph, Position, grid_position,
    synthesize_edge_id, transitive_upstream_of, upstream_of,
};

// Resolution
pub use crate::prefill::{
    DependencyType, FnProvider, PrefillBinding, PrefillConfigs, PrefillOption, PrefillProvider,
    PrefillResolver, SourceKind, resolve_candidates,
};

// Editor state
pub use crate::editor::{
    CandidateModal, ClickTarget, FieldPanel, GraphEvent, LoadState, PanelRequest, PrefillEditor,
};

// Rendering
pub use crate::render::TextFormatter;

// Error types
pub use crate::error::FetchError;
