//! Tests for the headless editor: controller, field panel and candidate modal.
mod common;
use common::*;
use prefill::editor::GLOBAL_GROUP_LABEL;
use prefill::prelude::*;

fn ready_editor() -> PrefillEditor {
    PrefillEditor::with_graph(create_chain_graph(), PrefillResolver::default())
}

fn modal(editor: &mut PrefillEditor) -> &mut CandidateModal {
    editor
        .panel_mut()
        .and_then(|p| p.modal_mut())
        .expect("modal should be open")
}

#[test]
fn test_editor_starts_loading_and_ignores_interaction() {
    let mut editor = PrefillEditor::default();
    assert_eq!(editor.state(), &LoadState::Loading);
    assert!(editor.graph().is_none());
    assert!(!editor.select_node("A"));
    assert!(!editor.open_field("a_email"));
    assert!(editor.candidates_for("C", "c_notes").is_empty());
}

#[test]
fn test_failed_load_and_retry() {
    let mut editor = PrefillEditor::default();
    let state = editor.finish_loading(parse_graph_response("not json"));
    assert!(matches!(state, LoadState::Failed(message) if message.contains("Failed to parse graph JSON")));
    assert!(editor.graph().is_none());

    editor.retry();
    assert_eq!(editor.state(), &LoadState::Loading);

    editor.finish_loading(parse_graph_response(GRAPH_JSON));
    assert!(editor.is_ready());
    assert_eq!(editor.graph().map(|g| g.nodes.len()), Some(3));
}

#[test]
fn test_select_node_opens_enabled_panel() {
    let mut editor = ready_editor();
    assert!(!editor.select_node("missing"));
    assert!(editor.select_node("B"));
    assert_eq!(editor.selected_node_id(), Some("B"));

    let panel = editor.panel().expect("panel open");
    assert!(panel.is_enabled());
    assert!(panel.modal().is_none());

    editor.apply_event(GraphEvent::SelectionCleared);
    assert!(editor.panel().is_none());
}

#[test]
fn test_panel_rows_show_bindings() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    modal(&mut editor).stage("B.b_phone");
    editor.confirm_selection();

    let graph = editor.graph().expect("loaded");
    let node = graph.node("C").expect("C exists");
    let panel = editor.panel().expect("panel open");
    let rows = panel.rows(node, editor.bindings().node_bindings("C"));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field.id, "c_notes");
    assert!(rows[0].configurable);
    assert_eq!(
        rows[0].binding.map(|b| b.describe()),
        Some("Form B -> Phone (form)".to_string())
    );
}

#[test]
fn test_modal_groups_by_source_node() {
    let mut editor = ready_editor();
    editor.select_node("C");
    assert!(editor.open_field("c_notes"));

    let modal = modal(&mut editor);
    assert_eq!(modal.title(), "Prefill \"Notes\" on \"Form C\"");
    let groups = modal.groups();
    let labels: Vec<&str> = groups.iter().map(|g| g.label).collect();
    assert_eq!(labels, vec!["Form B", "Form A", GLOBAL_GROUP_LABEL]);
    assert_eq!(groups[2].key, "global");
    assert_eq!(groups[2].candidates.len(), 3);
    assert!(groups.iter().all(|g| g.expanded));
}

#[test]
fn test_modal_toggle_group() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    let modal = modal(&mut editor);

    assert!(modal.toggle_group("A"));
    assert!(!modal.is_expanded("A"));
    assert!(modal.is_expanded("B"));
    assert!(modal.toggle_group("A"));
    assert!(modal.is_expanded("A"));
    assert!(!modal.toggle_group("nope"));

    modal.collapse_all();
    assert!(modal.groups().iter().all(|g| !g.expanded));
    modal.expand_all();
    assert!(modal.groups().iter().all(|g| g.expanded));
}

#[test]
fn test_modal_search_filters_case_insensitively() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    let modal = modal(&mut editor);

    modal.set_search("EMAIL");
    let groups = modal.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "Form A");
    assert_eq!(groups[0].candidates.len(), 1);
    assert_eq!(groups[0].candidates[0].id, "A.a_email");
    assert_eq!(groups[1].label, GLOBAL_GROUP_LABEL);
    assert_eq!(groups[1].candidates[0].id, "global.currentUserEmail");

    modal.set_search("zzz");
    assert!(modal.groups().is_empty());

    modal.clear_search();
    assert_eq!(modal.groups().len(), 3);
}

#[test]
fn test_modal_search_keeps_groups_whose_label_matches() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    let modal = modal(&mut editor);

    modal.set_search("global data");
    let groups = modal.groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, GLOBAL_GROUP_LABEL);
    assert_eq!(groups[0].candidates.len(), 3);
}

#[test]
fn test_only_one_candidate_is_staged() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    let modal = modal(&mut editor);

    assert!(modal.staged().is_none());
    assert!(modal.stage("A.a_email"));
    assert!(modal.stage("B.b_phone"));
    assert_eq!(modal.staged().map(|o| o.id.as_str()), Some("B.b_phone"));
    assert!(!modal.stage("Z.nothing"));
    assert_eq!(modal.staged().map(|o| o.id.as_str()), Some("B.b_phone"));
}

#[test]
fn test_confirm_stores_binding_with_labels() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    modal(&mut editor).stage("A.a_name");

    let binding = editor.confirm_selection().cloned().expect("binding stored");
    assert_eq!(binding.source_node_id, "A");
    assert_eq!(binding.source_field_id, "a_name");
    assert_eq!(binding.source_kind, SourceKind::Form);
    assert_eq!(binding.source_node_label.as_deref(), Some("Form A"));
    assert_eq!(binding.source_field_label.as_deref(), Some("Name"));
    assert_eq!(editor.bindings().get("C", "c_notes"), Some(&binding));
    assert!(editor.panel().and_then(|p| p.modal()).is_none());
}

#[test]
fn test_confirm_without_staging_keeps_modal_open() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");

    assert!(editor.confirm_selection().is_none());
    assert!(editor.panel().and_then(|p| p.modal()).is_some());
    assert!(editor.bindings().is_empty());
}

#[test]
fn test_global_binding_falls_back_to_ids() {
    let mut editor = ready_editor();
    editor.select_node("A");
    editor.open_field("a_email");
    modal(&mut editor).stage("global.currentDate");

    let binding = editor.confirm_selection().expect("binding stored");
    assert_eq!(binding.source_kind, SourceKind::Global);
    assert_eq!(binding.describe(), "global -> currentDate (global)");
}

#[test]
fn test_cancel_and_outside_click_close_without_effect() {
    let mut editor = ready_editor();
    editor.select_node("C");

    editor.open_field("c_notes");
    modal(&mut editor).stage("B.b_phone");
    editor.panel_mut().expect("panel").cancel_modal();
    assert!(editor.panel().and_then(|p| p.modal()).is_none());
    assert!(editor.bindings().is_empty());

    editor.open_field("c_notes");
    modal(&mut editor).stage("B.b_phone");
    let panel = editor.panel_mut().expect("panel");
    assert!(!panel.click_modal(ClickTarget::Content));
    assert!(panel.modal().is_some());
    assert!(panel.click_modal(ClickTarget::Backdrop));
    assert!(panel.modal().is_none());
    assert!(editor.bindings().is_empty());
}

#[test]
fn test_clear_removes_binding_and_preselection() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    modal(&mut editor).stage("B.b_address");
    editor.confirm_selection();

    // Re-opening a configured field pre-stages its binding
    editor.open_field("c_notes");
    assert_eq!(
        modal(&mut editor).staged().map(|o| o.id.as_str()),
        Some("B.b_address")
    );
    editor.panel_mut().expect("panel").cancel_modal();

    assert!(editor.clear_field("c_notes"));
    assert!(editor.bindings().get("C", "c_notes").is_none());
    assert!(editor.bindings().is_empty());
    assert!(!editor.clear_field("c_notes"));

    editor.open_field("c_notes");
    assert!(modal(&mut editor).staged().is_none());
}

#[test]
fn test_disabled_panel_blocks_configuration_but_keeps_bindings() {
    let mut editor = ready_editor();
    editor.select_node("B");
    editor.open_field("b_phone");
    modal(&mut editor).stage("A.a_email");
    editor.confirm_selection();
    editor.open_field("b_address");

    editor.panel_mut().expect("panel").toggle_enabled();
    let panel = editor.panel().expect("panel");
    assert!(!panel.is_enabled());
    assert!(panel.modal().is_none(), "disabling closes the modal");

    assert!(!editor.open_field("b_address"));
    assert!(!editor.clear_field("b_phone"));
    assert!(editor.bindings().get("B", "b_phone").is_some());

    let graph = editor.graph().expect("loaded");
    let rows = editor
        .panel()
        .expect("panel")
        .rows(graph.node("B").expect("B"), editor.bindings().node_bindings("B"));
    assert!(rows.iter().all(|r| !r.configurable));

    editor.panel_mut().expect("panel").set_enabled(true);
    assert!(editor.open_field("b_address"));
}

#[test]
fn test_unknown_field_does_not_open_modal() {
    let mut editor = ready_editor();
    assert!(!editor.open_field("c_notes"), "no node selected");
    editor.select_node("C");
    assert!(!editor.open_field("missing"));
}

#[test]
fn test_requery_after_selection_is_identical() {
    let mut editor = ready_editor();
    let before = editor.candidates_for("C", "c_notes");
    editor.select_node("C");
    editor.open_field("c_notes");
    modal(&mut editor).stage("A.a_email");
    editor.confirm_selection();
    assert_eq!(editor.candidates_for("C", "c_notes"), before);
}

#[test]
fn test_graph_events_update_positions_and_edges() {
    let mut editor = ready_editor();

    editor.apply_event(GraphEvent::NodeMoved {
        node_id: "A".to_string(),
        position: Position { x: 42.0, y: 7.0 },
    });
    assert_eq!(
        editor.graph().and_then(|g| g.node("A")).map(|n| n.position),
        Some(Position { x: 42.0, y: 7.0 })
    );

    editor.apply_event(GraphEvent::EdgeConnected {
        source: "C".to_string(),
        target: "A".to_string(),
    });
    let edge_id = editor
        .graph()
        .and_then(|g| g.edges.last())
        .map(|e| e.id.clone())
        .expect("edge added");
    assert_eq!(edge_id, "eC-A-2");
    assert_eq!(editor.candidates_for("A", "a_email").len(), 1 + 2 + 2 + 3);

    editor.apply_event(GraphEvent::EdgeRemoved { edge_id });
    assert_eq!(editor.candidates_for("A", "a_email").len(), 3);

    editor.apply_event(GraphEvent::NodeSelected {
        node_id: "B".to_string(),
    });
    assert_eq!(editor.selected_node_id(), Some("B"));
}

#[test]
fn test_update_prefill_overwrites_and_removes() {
    let mut editor = ready_editor();
    let graph = create_chain_graph();
    let options = editor.candidates_for("C", "c_notes");

    let first = PrefillBinding::from_option(&options[0], &graph.nodes);
    let second = PrefillBinding::from_option(&options[1], &graph.nodes);
    editor.update_prefill("C", "c_notes", Some(first));
    editor.update_prefill("C", "c_notes", Some(second.clone()));
    assert_eq!(editor.bindings().len(), 1);
    assert_eq!(editor.bindings().get("C", "c_notes"), Some(&second));

    editor.update_prefill("C", "c_notes", None);
    assert!(editor.bindings().is_empty());
}

#[test]
fn test_reselecting_current_node_keeps_panel_state() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    modal(&mut editor).stage("B.b_phone");

    editor.apply_event(GraphEvent::NodeSelected {
        node_id: "C".to_string(),
    });
    assert_eq!(
        modal(&mut editor).staged().map(|o| o.id.as_str()),
        Some("B.b_phone")
    );

    editor.panel_mut().expect("panel").set_enabled(false);
    assert!(editor.select_node("C"));
    assert!(!editor.panel().expect("panel").is_enabled());

    assert!(editor.select_node("B"));
    let panel = editor.panel().expect("panel");
    assert_eq!(panel.node_id(), "B");
    assert!(panel.is_enabled());
}

#[test]
fn test_unstage_leaves_nothing_to_confirm() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    let modal = modal(&mut editor);
    modal.stage("A.a_email");
    modal.unstage();
    assert!(modal.staged().is_none());

    assert!(editor.confirm_selection().is_none());
    assert!(editor.bindings().is_empty());
}

#[test]
fn test_editor_exposes_its_resolver() {
    let resolver = PrefillResolver::builder().without_provider("global").build();
    let editor = PrefillEditor::with_graph(create_chain_graph(), resolver);

    assert_eq!(editor.resolver().provider_names(), vec!["direct", "transitive"]);
    assert_eq!(editor.candidates_for("C", "c_notes").len(), 4);
}

#[test]
fn test_failed_reload_drops_panel_and_bindings() {
    let mut editor = ready_editor();
    editor.select_node("C");
    editor.open_field("c_notes");
    modal(&mut editor).stage("B.b_phone");
    editor.confirm_selection();
    editor.open_field("c_notes");

    let state = editor.finish_loading(parse_graph_response("{ broken"));
    assert!(matches!(state, LoadState::Failed(_)));
    assert!(editor.panel().is_none());
    assert!(editor.panel_mut().is_none());
    assert!(editor.bindings().is_empty());
    assert!(editor.graph().is_none());
}
