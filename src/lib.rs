//! # Prefill - Dependency-Aware Form Prefill Resolution
//!
//! **Prefill** models a directed graph of forms, where an edge `A -> B` means
//! form `B` depends on form `A`, and works out which upstream fields (or
//! global values) may prefill a field of a selected form. The editor state
//! around it (selection, field panel, candidate browser, bindings) is kept
//! headless so that any front end can drive it.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Graph**: Fetch the blueprint graph with a `GraphClient`, or
//!     parse a payload you already have with `parse_graph_response`.
//! 2.  **Convert**: `IntoGraph` turns the payload into a `FormGraph`. Nodes
//!     whose form definition is missing simply get no fields.
//! 3.  **Resolve**: A `PrefillResolver` concatenates the output of its
//!     providers (direct dependencies, transitive dependencies, global data).
//!     New source kinds are added by registering another `PrefillProvider`.
//! 4.  **Edit**: `PrefillEditor` owns the graph and the bindings; the field
//!     panel and the candidate modal hand their changes back to it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prefill::prelude::*;
//!
//! # async fn run() -> Result<(), FetchError> {
//! let client = GraphClient::builder()
//!     .base_url("http://localhost:3000")
//!     .namespace("test-namespace")
//!     .blueprint("test-blueprint")
//!     .build()?;
//!
//! let mut editor = PrefillEditor::default();
//! if let LoadState::Failed(message) = editor.load(&client).await {
//!     eprintln!("Error: {}", message);
//!     return Ok(());
//! }
//!
//! // Select a form and open the candidate browser for one of its fields.
//! editor.select_node("form-d");
//! editor.open_field("email");
//!
//! if let Some(modal) = editor.panel_mut().and_then(|p| p.modal_mut()) {
//!     modal.set_search("email");
//!     for group in modal.groups() {
//!         println!("{} ({})", group.label, group.candidates.len());
//!     }
//!     let first = modal.candidates().first().map(|o| o.id.clone());
//!     if let Some(id) = first {
//!         modal.stage(&id);
//!     }
//! }
//!
//! if let Some(binding) = editor.confirm_selection() {
//!     println!("Prefilled from: {}", binding.describe());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod editor;
pub mod error;
pub mod graph;
pub mod prefill;
pub mod prelude;
pub mod render;
