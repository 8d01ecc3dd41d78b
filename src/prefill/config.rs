use super::types::PrefillBinding;
use ahash::AHashMap;

/// Bindings of one node, keyed by target field id.
pub type NodeBindings = AHashMap<String, PrefillBinding>;

/// In-memory prefill configuration: target node id -> target field id -> binding.
/// A missing entry means the field is not configured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefillConfigs {
    nodes: AHashMap<String, NodeBindings>,
}

impl PrefillConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node_id: &str, field_id: &str) -> Option<&PrefillBinding> {
        self.nodes.get(node_id).and_then(|fields| fields.get(field_id))
    }

    /// Stores `binding`, returning the binding it replaced.
    pub fn set(&mut self, node_id: &str, field_id: &str, binding: PrefillBinding) -> Option<PrefillBinding> {
        self.nodes
            .entry(node_id.to_string())
            .or_default()
            .insert(field_id.to_string(), binding)
    }

    /// Removes the binding of one field, dropping the node entry once it is empty.
    pub fn clear(&mut self, node_id: &str, field_id: &str) -> Option<PrefillBinding> {
        let fields = self.nodes.get_mut(node_id)?;
        let removed = fields.remove(field_id);
        if fields.is_empty() {
            self.nodes.remove(node_id);
        }
        removed
    }

    pub fn node_bindings(&self, node_id: &str) -> Option<&NodeBindings> {
        self.nodes.get(node_id)
    }

    /// Total number of configured fields.
    pub fn len(&self) -> usize {
        self.nodes.values().map(|fields| fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
