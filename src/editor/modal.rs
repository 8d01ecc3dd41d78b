use crate::graph::{FormField, FormNode, find_node};
use crate::prefill::{GLOBAL_SOURCE_ID, PrefillBinding, PrefillOption, SourceKind};
use ahash::AHashSet;
use itertools::Itertools;

/// Label of the synthetic group holding every global candidate.
pub const GLOBAL_GROUP_LABEL: &str = "Global Data";

/// What the user clicked while the modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The modal body; does nothing by itself.
    Content,
    /// The backdrop around the modal; dismisses it.
    Backdrop,
}

/// How an open modal was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Confirmed(PrefillOption),
    Dismissed,
}

#[derive(Debug, Clone)]
struct CandidateGroup {
    key: String,
    label: String,
}

/// A group as currently displayed, after search filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroupView<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub expanded: bool,
    pub candidates: Vec<&'a PrefillOption>,
}

/// Candidate browser for one (node, field) target.
///
/// Candidates are grouped by source node in order of first appearance, with
/// all global candidates under one group. Groups start expanded.
#[derive(Debug, Clone)]
pub struct CandidateModal {
    node_id: String,
    node_label: String,
    field_id: String,
    field_name: String,
    candidates: Vec<PrefillOption>,
    groups: Vec<CandidateGroup>,
    collapsed: AHashSet<String>,
    search: String,
    staged: Option<String>,
}

fn group_key(option: &PrefillOption) -> &str {
    match option.source_kind {
        SourceKind::Global => GLOBAL_SOURCE_ID,
        SourceKind::Form => &option.source_node_id,
    }
}

impl CandidateModal {
    /// Opens the modal over `candidates`; `current` pre-stages the candidate it points at.
    pub fn new(
        target_node: &FormNode,
        target_field: &FormField,
        candidates: Vec<PrefillOption>,
        nodes: &[FormNode],
        current: Option<&PrefillBinding>,
    ) -> Self {
        let groups = candidates
            .iter()
            .map(|option| (group_key(option), option))
            .unique_by(|(key, _)| *key)
            .map(|(key, option)| CandidateGroup {
                key: key.to_string(),
                label: match option.source_kind {
                    SourceKind::Global => GLOBAL_GROUP_LABEL.to_string(),
                    SourceKind::Form => find_node(nodes, key)
                        .map(|n| n.label.clone())
                        .unwrap_or_else(|| key.to_string()),
                },
            })
            .collect();

        let staged = current.and_then(|binding| {
            candidates
                .iter()
                .find(|option| binding.matches(option))
                .map(|option| option.id.clone())
        });

        Self {
            node_id: target_node.id.clone(),
            node_label: target_node.label.clone(),
            field_id: target_field.id.clone(),
            field_name: target_field.name.clone(),
            candidates,
            groups,
            collapsed: AHashSet::new(),
            search: String::new(),
            staged,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// `Prefill "<field>" on "<node>"`
    pub fn title(&self) -> String {
        format!("Prefill \"{}\" on \"{}\"", self.field_name, self.node_label)
    }

    pub fn candidates(&self) -> &[PrefillOption] {
        &self.candidates
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Groups to display. With a search term, candidates are filtered by
    /// case-insensitive label substring and groups left without members are
    /// hidden, unless the group label itself matches, in which case the
    /// whole group is shown.
    pub fn groups(&self) -> Vec<CandidateGroupView<'_>> {
        let term = self.search.trim().to_lowercase();
        self.groups
            .iter()
            .filter_map(|group| {
                let members = self
                    .candidates
                    .iter()
                    .filter(|option| group_key(option) == group.key);
                let candidates: Vec<&PrefillOption> =
                    if term.is_empty() || group.label.to_lowercase().contains(&term) {
                        members.collect()
                    } else {
                        members
                            .filter(|option| option.label.to_lowercase().contains(&term))
                            .collect()
                    };
                if candidates.is_empty() {
                    return None;
                }
                Some(CandidateGroupView {
                    key: &group.key,
                    label: &group.label,
                    expanded: !self.collapsed.contains(&group.key),
                    candidates,
                })
            })
            .collect()
    }

    /// Flips a group between expanded and collapsed. Returns false for unknown keys.
    pub fn toggle_group(&mut self, key: &str) -> bool {
        if !self.groups.iter().any(|g| g.key == key) {
            return false;
        }
        if !self.collapsed.remove(key) {
            self.collapsed.insert(key.to_string());
        }
        true
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.groups.iter().any(|g| g.key == key) && !self.collapsed.contains(key)
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all(&mut self) {
        self.collapsed = self.groups.iter().map(|g| g.key.clone()).collect();
    }

    /// Stages a candidate, replacing any previously staged one.
    /// Returns false if no candidate has that id.
    pub fn stage(&mut self, option_id: &str) -> bool {
        if self.candidates.iter().any(|o| o.id == option_id) {
            self.staged = Some(option_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn unstage(&mut self) {
        self.staged = None;
    }

    pub fn staged(&self) -> Option<&PrefillOption> {
        let id = self.staged.as_deref()?;
        self.candidates.iter().find(|o| o.id == id)
    }

    /// Emits the staged candidate; with nothing staged the modal stays open.
    pub fn confirm(&self) -> Option<ModalOutcome> {
        self.staged().cloned().map(ModalOutcome::Confirmed)
    }

    pub fn cancel(&self) -> ModalOutcome {
        ModalOutcome::Dismissed
    }

    pub fn click(&self, target: ClickTarget) -> Option<ModalOutcome> {
        match target {
            ClickTarget::Backdrop => Some(ModalOutcome::Dismissed),
            ClickTarget::Content => None,
        }
    }
}
