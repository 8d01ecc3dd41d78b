use crate::editor::{CandidateModal, FieldPanel};
use crate::graph::{FormGraph, UpstreamIndex};
use crate::prefill::PrefillConfigs;
use itertools::Itertools;

/// Message shown by a modal without any candidate.
pub const NO_CANDIDATES_MESSAGE: &str = "No available prefill sources found for this field.";

/// Renders editor snapshots as plain text.
pub struct TextFormatter;

impl TextFormatter {
    /// Lists every node with its position, fields and the nodes feeding it.
    pub fn format_graph(graph: &FormGraph) -> String {
        let index = UpstreamIndex::new(&graph.edges);
        let mut output = format!(
            "======== GRAPH: {} ({} nodes, {} edges) ========\n",
            graph.name,
            graph.nodes.len(),
            graph.edges.len()
        );
        for node in &graph.nodes {
            output.push_str(&format!(
                "\n[{}] {} @ ({}, {})\n",
                node.id, node.label, node.position.x, node.position.y
            ));
            let upstream = index.direct(&node.id);
            if !upstream.is_empty() {
                output.push_str(&format!("  <- {}\n", upstream.iter().join(", ")));
            }
            for field in &node.fields {
                output.push_str(&format!("  - {} ({}): {}\n", field.id, field.field_type, field.name));
            }
        }
        output
    }

    pub fn format_panel(panel: &FieldPanel, graph: &FormGraph, configs: &PrefillConfigs) -> String {
        let Some(node) = graph.node(panel.node_id()) else {
            return String::new();
        };
        let state = if panel.is_enabled() { "enabled" } else { "disabled" };
        let mut output = format!("--- Prefill Config: {} [{}] ---\n", node.label, state);
        if node.fields.is_empty() {
            output.push_str("This form has no fields.\n");
        }
        for row in panel.rows(node, configs.node_bindings(&node.id)) {
            let status = match row.binding {
                Some(binding) => format!("Prefilled from: {}", binding.describe()),
                None => "No prefill configured.".to_string(),
            };
            output.push_str(&format!(
                "{} (ID: {}, Type: {})\n    {}\n",
                row.field.name, row.field.id, row.field.field_type, status
            ));
        }
        output
    }

    pub fn format_modal(modal: &CandidateModal) -> String {
        let mut output = format!("--- {} ---\n", modal.title());
        if !modal.search().is_empty() {
            output.push_str(&format!("Search: \"{}\"\n", modal.search()));
        }
        let groups = modal.groups();
        if groups.is_empty() {
            output.push_str(&format!("{}\n", NO_CANDIDATES_MESSAGE));
        }
        let staged_id = modal.staged().map(|o| o.id.as_str());
        for group in groups {
            let marker = if group.expanded { "v" } else { ">" };
            output.push_str(&format!(
                "{} {} [{}] ({})\n",
                marker,
                group.label,
                group.key,
                group.candidates.len()
            ));
            if !group.expanded {
                continue;
            }
            for option in group.candidates {
                let staged = if Some(option.id.as_str()) == staged_id { "*" } else { " " };
                let tag = option
                    .dependency
                    .map(|d| format!(" <{}>", d))
                    .unwrap_or_default();
                output.push_str(&format!("   {} {}  {}{}\n", staged, option.id, option.label, tag));
            }
        }
        output
    }
}
