use super::types::{DependencyType, PrefillOption};
use crate::graph::{FormEdge, FormField, FormNode, UpstreamIndex, find_node};
use tracing::debug;

/// Defines the contract for one kind of prefill source.
///
/// Every provider receives the same view of the graph. `target_field` is
/// handed to all providers so a provider can filter by type compatibility;
/// the shipped providers offer every field regardless of its type.
pub trait PrefillProvider: Send + Sync {
    /// Registry key of the provider, e.g. `"direct"`.
    fn name(&self) -> &str;

    fn provide(
        &self,
        target_node: &FormNode,
        target_field: &FormField,
        nodes: &[FormNode],
        edges: &[FormEdge],
    ) -> Vec<PrefillOption>;
}

/// Emits one candidate per field of every node `ids` names, skipping ids
/// that are not in `nodes`.
fn options_for_nodes(
    ids: &[&str],
    nodes: &[FormNode],
    dependency: DependencyType,
) -> Vec<PrefillOption> {
    let mut options = Vec::new();
    for &source_id in ids {
        match find_node(nodes, source_id) {
            Some(source) => options.extend(
                source
                    .fields
                    .iter()
                    .map(|field| PrefillOption::form(source, field, dependency)),
            ),
            None => debug!(node_id = source_id, "upstream node not found; skipped"),
        }
    }
    options
}

/// Fields of the nodes with an edge directly into the target.
pub struct DirectDependencyProvider;

impl PrefillProvider for DirectDependencyProvider {
    fn name(&self) -> &str {
        "direct"
    }

    fn provide(
        &self,
        target_node: &FormNode,
        _target_field: &FormField,
        nodes: &[FormNode],
        edges: &[FormEdge],
    ) -> Vec<PrefillOption> {
        let index = UpstreamIndex::new(edges);
        options_for_nodes(index.direct(&target_node.id), nodes, DependencyType::Direct)
    }
}

/// Fields of the nodes that reach the target only through longer paths.
/// A node that also has a direct edge is left to the direct provider.
pub struct TransitiveDependencyProvider;

impl PrefillProvider for TransitiveDependencyProvider {
    fn name(&self) -> &str {
        "transitive"
    }

    fn provide(
        &self,
        target_node: &FormNode,
        _target_field: &FormField,
        nodes: &[FormNode],
        edges: &[FormEdge],
    ) -> Vec<PrefillOption> {
        let index = UpstreamIndex::new(edges);
        let direct = index.direct(&target_node.id);
        let transitive_only: Vec<&str> = index
            .transitive(&target_node.id)
            .into_iter()
            .filter(|id| !direct.contains(id))
            .collect();
        options_for_nodes(&transitive_only, nodes, DependencyType::Transitive)
    }
}

/// Placeholder global values: key and display label.
pub const GLOBAL_DATA: &[(&str, &str)] = &[
    ("currentUserEmail", "Global - Current User Email"),
    ("currentDate", "Global - Current Date"),
    ("clientName", "Global - Client Name (Mocked)"),
];

/// A fixed list of graph-independent sources.
pub struct GlobalDataProvider;

impl PrefillProvider for GlobalDataProvider {
    fn name(&self) -> &str {
        "global"
    }

    fn provide(
        &self,
        _target_node: &FormNode,
        _target_field: &FormField,
        _nodes: &[FormNode],
        _edges: &[FormEdge],
    ) -> Vec<PrefillOption> {
        GLOBAL_DATA
            .iter()
            .map(|(key, label)| PrefillOption::global(key, label))
            .collect()
    }
}

/// Adapts a plain function or closure into a provider.
///
/// ```rust,no_run
/// use prefill::prelude::*;
///
/// let tenant = FnProvider::new("constant", |_node, _field, _nodes, _edges| {
///     vec![PrefillOption::global("tenant", "Global - Tenant")]
/// });
/// let resolver = PrefillResolver::builder().with_provider(Box::new(tenant)).build();
/// assert_eq!(resolver.provider_names(), vec!["direct", "transitive", "global", "constant"]);
/// ```
pub struct FnProvider<F> {
    name: String,
    func: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&FormNode, &FormField, &[FormNode], &[FormEdge]) -> Vec<PrefillOption> + Send + Sync,
{
    pub fn new(name: &str, func: F) -> Self {
        Self {
            name: name.to_string(),
            func,
        }
    }
}

impl<F> PrefillProvider for FnProvider<F>
where
    F: Fn(&FormNode, &FormField, &[FormNode], &[FormEdge]) -> Vec<PrefillOption> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(
        &self,
        target_node: &FormNode,
        target_field: &FormField,
        nodes: &[FormNode],
        edges: &[FormEdge],
    ) -> Vec<PrefillOption> {
        (self.func)(target_node, target_field, nodes, edges)
    }
}

/// The shipped providers, in resolution order.
pub fn default_providers() -> Vec<Box<dyn PrefillProvider>> {
    vec![
        Box::new(DirectDependencyProvider),
        Box::new(TransitiveDependencyProvider),
        Box::new(GlobalDataProvider),
    ]
}

/// Creates a shipped provider by its registry key.
pub fn create_provider_by_name(name: &str) -> Option<Box<dyn PrefillProvider>> {
    match name {
        "direct" => Some(Box::new(DirectDependencyProvider)),
        "transitive" => Some(Box::new(TransitiveDependencyProvider)),
        "global" => Some(Box::new(GlobalDataProvider)),
        _ => None,
    }
}
