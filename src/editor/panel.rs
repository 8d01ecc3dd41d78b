use super::modal::{CandidateModal, ClickTarget, ModalOutcome};
use crate::graph::{FormField, FormGraph, FormNode};
use crate::prefill::{NodeBindings, PrefillBinding, PrefillConfigs, PrefillOption, PrefillResolver};
use tracing::debug;

/// A binding change the panel asks the controller to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRequest {
    Bind {
        node_id: String,
        field_id: String,
        option: PrefillOption,
    },
    Clear {
        node_id: String,
        field_id: String,
    },
}

/// One line of the panel: a field and its current binding.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow<'a> {
    pub field: &'a FormField,
    pub binding: Option<&'a PrefillBinding>,
    /// False while the panel is disabled.
    pub configurable: bool,
}

/// Per-field prefill configuration of the selected node.
///
/// The panel never touches bindings itself; it reads them from the
/// controller's snapshot and hands back `PanelRequest`s.
#[derive(Debug, Clone)]
pub struct FieldPanel {
    node_id: String,
    enabled: bool,
    modal: Option<CandidateModal>,
}

impl FieldPanel {
    pub fn new(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            enabled: true,
            modal: None,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling closes an open modal; existing bindings are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.modal = None;
        }
    }

    pub fn toggle_enabled(&mut self) {
        self.set_enabled(!self.enabled);
    }

    pub fn rows<'a>(&self, node: &'a FormNode, bindings: Option<&'a NodeBindings>) -> Vec<FieldRow<'a>> {
        node.fields
            .iter()
            .map(|field| FieldRow {
                field,
                binding: bindings.and_then(|b| b.get(&field.id)),
                configurable: self.enabled,
            })
            .collect()
    }

    /// Opens the candidate modal for `field_id`, pre-staging its current binding.
    /// Does nothing while disabled or when the field does not exist.
    pub fn open_field(
        &mut self,
        field_id: &str,
        graph: &FormGraph,
        resolver: &PrefillResolver,
        configs: &PrefillConfigs,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(node) = graph.node(&self.node_id) else {
            debug!(node_id = %self.node_id, "selected node no longer in graph");
            return false;
        };
        let Some(field) = node.field(field_id) else {
            debug!(node_id = %self.node_id, field_id, "field not found");
            return false;
        };
        let candidates = resolver.resolve(node, field, &graph.nodes, &graph.edges);
        let current = configs.get(&node.id, &field.id);
        self.modal = Some(CandidateModal::new(node, field, candidates, &graph.nodes, current));
        true
    }

    /// Asks for a configured field's binding to be removed.
    pub fn request_clear(&self, field_id: &str, configs: &PrefillConfigs) -> Option<PanelRequest> {
        if !self.enabled || configs.get(&self.node_id, field_id).is_none() {
            return None;
        }
        Some(PanelRequest::Clear {
            node_id: self.node_id.clone(),
            field_id: field_id.to_string(),
        })
    }

    pub fn modal(&self) -> Option<&CandidateModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut CandidateModal> {
        self.modal.as_mut()
    }

    /// Confirms the staged candidate, closing the modal.
    pub fn confirm_modal(&mut self) -> Option<PanelRequest> {
        let outcome = self.modal.as_ref()?.confirm()?;
        self.finish(outcome)
    }

    pub fn cancel_modal(&mut self) {
        if let Some(outcome) = self.modal.as_ref().map(CandidateModal::cancel) {
            self.finish(outcome);
        }
    }

    /// Routes a click to the open modal. Returns true if it closed the modal.
    pub fn click_modal(&mut self, target: ClickTarget) -> bool {
        match self.modal.as_ref().and_then(|m| m.click(target)) {
            Some(outcome) => {
                self.finish(outcome);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, outcome: ModalOutcome) -> Option<PanelRequest> {
        let modal = self.modal.take()?;
        match outcome {
            ModalOutcome::Confirmed(option) => Some(PanelRequest::Bind {
                node_id: modal.node_id().to_string(),
                field_id: modal.field_id().to_string(),
                option,
            }),
            ModalOutcome::Dismissed => None,
        }
    }
}
