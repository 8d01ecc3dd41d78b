use super::events::GraphEvent;
use super::panel::{FieldPanel, PanelRequest};
use crate::api::{ApiGraphResponse, GraphClient};
use crate::error::FetchError;
use crate::graph::{FormEdge, FormGraph, IntoGraph, synthesize_edge_id};
use crate::prefill::{PrefillBinding, PrefillConfigs, PrefillOption, PrefillResolver};
use tracing::{debug, info, warn};

/// Lifecycle of the initial graph fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    /// The fetch failed; `retry` starts over.
    Failed(String),
    Ready,
}

/// Owns all editor state: the graph, the selection, and the bindings.
///
/// Views receive read-only snapshots and report changes back as
/// `GraphEvent`s and `PanelRequest`s. Every interactive operation is a no-op
/// unless the graph has loaded.
pub struct PrefillEditor {
    state: LoadState,
    graph: FormGraph,
    configs: PrefillConfigs,
    panel: Option<FieldPanel>,
    resolver: PrefillResolver,
}

impl Default for PrefillEditor {
    fn default() -> Self {
        Self::new(PrefillResolver::default())
    }
}

impl PrefillEditor {
    pub fn new(resolver: PrefillResolver) -> Self {
        Self {
            state: LoadState::Loading,
            graph: FormGraph::default(),
            configs: PrefillConfigs::new(),
            panel: None,
            resolver,
        }
    }

    /// An editor that is already showing `graph`.
    pub fn with_graph(graph: FormGraph, resolver: PrefillResolver) -> Self {
        let mut editor = Self::new(resolver);
        editor.graph = graph;
        editor.state = LoadState::Ready;
        editor
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// The loaded graph, if any.
    pub fn graph(&self) -> Option<&FormGraph> {
        self.is_ready().then_some(&self.graph)
    }

    pub fn bindings(&self) -> &PrefillConfigs {
        &self.configs
    }

    pub fn resolver(&self) -> &PrefillResolver {
        &self.resolver
    }

    /// Fetches the graph once and folds the result into the editor state.
    pub async fn load(&mut self, client: &GraphClient) -> &LoadState {
        self.state = LoadState::Loading;
        let result = client.fetch_graph().await;
        self.finish_loading(result)
    }

    /// Folds a fetch result into the editor. The previous selection is
    /// dropped either way; a failure also drops the graph and bindings.
    pub fn finish_loading(&mut self, result: Result<ApiGraphResponse, FetchError>) -> &LoadState {
        self.panel = None;
        match result {
            Ok(response) => {
                self.graph = response.into_graph();
                self.state = LoadState::Ready;
                info!(graph_id = %self.graph.id, "editor ready");
            }
            Err(e) => {
                warn!(error = %e, "failed to load graph");
                self.graph = FormGraph::default();
                self.configs = PrefillConfigs::new();
                self.state = LoadState::Failed(e.to_string());
            }
        }
        &self.state
    }

    /// Drops everything and returns to `Loading`; the caller fetches again.
    pub fn retry(&mut self) {
        self.state = LoadState::Loading;
        self.graph = FormGraph::default();
        self.configs = PrefillConfigs::new();
        self.panel = None;
    }

    pub fn apply_event(&mut self, event: GraphEvent) {
        if !self.is_ready() {
            return;
        }
        match event {
            GraphEvent::NodeMoved { node_id, position } => match self.graph.node_mut(&node_id) {
                Some(node) => node.position = position,
                None => debug!(%node_id, "moved node not found"),
            },
            GraphEvent::EdgeConnected { source, target } => {
                let id = self.next_edge_id(&source, &target);
                self.graph.edges.push(FormEdge { id, source, target });
            }
            GraphEvent::EdgeRemoved { edge_id } => {
                self.graph.edges.retain(|e| e.id != edge_id);
            }
            GraphEvent::NodeSelected { node_id } => {
                self.select_node(&node_id);
            }
            GraphEvent::SelectionCleared => self.close_panel(),
        }
    }

    fn next_edge_id(&self, source: &str, target: &str) -> String {
        let mut index = self.graph.edges.len();
        loop {
            let id = synthesize_edge_id(source, target, index);
            if !self.graph.edges.iter().any(|e| e.id == id) {
                return id;
            }
            index += 1;
        }
    }

    /// Opens a fresh panel for `node_id`. Unknown ids leave the selection
    /// unchanged; re-selecting the current node keeps its panel as it is.
    pub fn select_node(&mut self, node_id: &str) -> bool {
        if !self.is_ready() || self.graph.node(node_id).is_none() {
            return false;
        }
        if self.selected_node_id() == Some(node_id) {
            return true;
        }
        self.panel = Some(FieldPanel::new(node_id));
        true
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.panel.as_ref().map(FieldPanel::node_id)
    }

    pub fn panel(&self) -> Option<&FieldPanel> {
        self.panel.as_ref()
    }

    /// Panel access for view-local state: the enabled flag and the modal's
    /// search, groups and staging.
    pub fn panel_mut(&mut self) -> Option<&mut FieldPanel> {
        self.panel.as_mut()
    }

    /// Opens the candidate modal for a field of the selected node.
    pub fn open_field(&mut self, field_id: &str) -> bool {
        if !self.is_ready() {
            return false;
        }
        match self.panel.as_mut() {
            Some(panel) => panel.open_field(field_id, &self.graph, &self.resolver, &self.configs),
            None => false,
        }
    }

    /// Clears a field of the selected node through the panel.
    pub fn clear_field(&mut self, field_id: &str) -> bool {
        let request = self
            .panel
            .as_ref()
            .and_then(|p| p.request_clear(field_id, &self.configs));
        match request {
            Some(request) => {
                self.handle(request);
                true
            }
            None => false,
        }
    }

    /// Confirms the staged candidate of the open modal and stores the binding.
    pub fn confirm_selection(&mut self) -> Option<&PrefillBinding> {
        let request = self.panel.as_mut()?.confirm_modal()?;
        let (node_id, field_id) = match &request {
            PanelRequest::Bind { node_id, field_id, .. } => (node_id.clone(), field_id.clone()),
            PanelRequest::Clear { .. } => return None,
        };
        self.handle(request);
        self.configs.get(&node_id, &field_id)
    }

    /// Applies a panel request.
    pub fn handle(&mut self, request: PanelRequest) {
        match request {
            PanelRequest::Bind {
                node_id,
                field_id,
                option,
            } => {
                let binding = PrefillBinding::from_option(&option, &self.graph.nodes);
                self.update_prefill(&node_id, &field_id, Some(binding));
            }
            PanelRequest::Clear { node_id, field_id } => {
                self.update_prefill(&node_id, &field_id, None);
            }
        }
    }

    /// Sets (`Some`) or removes (`None`) the binding of one field.
    pub fn update_prefill(&mut self, node_id: &str, field_id: &str, binding: Option<PrefillBinding>) {
        if !self.is_ready() {
            return;
        }
        match binding {
            Some(binding) => {
                debug!(node_id, field_id, source = %binding.describe(), "prefill bound");
                self.configs.set(node_id, field_id, binding);
            }
            None => {
                debug!(node_id, field_id, "prefill cleared");
                self.configs.clear(node_id, field_id);
            }
        }
    }

    /// Candidates for any field of the loaded graph; unknown ids yield none.
    pub fn candidates_for(&self, node_id: &str, field_id: &str) -> Vec<PrefillOption> {
        match self.graph() {
            Some(graph) => self.resolver.resolve_for(graph, node_id, field_id),
            None => Vec::new(),
        }
    }
}
