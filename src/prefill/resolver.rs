use super::providers::{PrefillProvider, default_providers};
use super::types::PrefillOption;
use crate::graph::{FormEdge, FormField, FormGraph, FormNode};
use tracing::debug;

/// Computes the prefill candidates of a target field as the ordered
/// concatenation of its providers' outputs.
///
/// The resolver holds no graph state; every call is a pure function of the
/// nodes, edges and target it is given.
pub struct PrefillResolver {
    providers: Vec<Box<dyn PrefillProvider>>,
}

pub struct PrefillResolverBuilder {
    providers: Vec<Box<dyn PrefillProvider>>,
}

impl PrefillResolverBuilder {
    /// Starts from the shipped providers: direct, transitive, global.
    pub fn new() -> Self {
        Self {
            providers: default_providers(),
        }
    }

    /// Starts with no providers at all.
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Appends `provider`, or replaces in place the provider registered under the same name.
    pub fn with_provider(mut self, provider: Box<dyn PrefillProvider>) -> Self {
        match self
            .providers
            .iter()
            .position(|p| p.name() == provider.name())
        {
            Some(index) => self.providers[index] = provider,
            None => self.providers.push(provider),
        }
        self
    }

    pub fn without_provider(mut self, name: &str) -> Self {
        self.providers.retain(|p| p.name() != name);
        self
    }

    pub fn build(self) -> PrefillResolver {
        PrefillResolver {
            providers: self.providers,
        }
    }
}

impl Default for PrefillResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PrefillResolver {
    fn default() -> Self {
        PrefillResolverBuilder::new().build()
    }
}

impl PrefillResolver {
    pub fn builder() -> PrefillResolverBuilder {
        PrefillResolverBuilder::new()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn resolve(
        &self,
        target_node: &FormNode,
        target_field: &FormField,
        nodes: &[FormNode],
        edges: &[FormEdge],
    ) -> Vec<PrefillOption> {
        let options: Vec<PrefillOption> = self
            .providers
            .iter()
            .flat_map(|p| p.provide(target_node, target_field, nodes, edges))
            .collect();
        debug!(
            node_id = %target_node.id,
            field_id = %target_field.id,
            candidates = options.len(),
            "resolved prefill candidates"
        );
        options
    }

    /// Resolves by ids; unknown node or field ids yield no candidates.
    pub fn resolve_for(&self, graph: &FormGraph, node_id: &str, field_id: &str) -> Vec<PrefillOption> {
        let Some(node) = graph.node(node_id) else {
            debug!(node_id, "target node not found");
            return Vec::new();
        };
        let Some(field) = node.field(field_id) else {
            debug!(node_id, field_id, "target field not found");
            return Vec::new();
        };
        self.resolve(node, field, &graph.nodes, &graph.edges)
    }
}

/// Resolves candidates with the shipped providers.
pub fn resolve_candidates(
    target_node: &FormNode,
    target_field: &FormField,
    nodes: &[FormNode],
    edges: &[FormEdge],
) -> Vec<PrefillOption> {
    PrefillResolver::default().resolve(target_node, target_field, nodes, edges)
}
