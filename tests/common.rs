//! Common test utilities for building form graphs and serving payloads.
use prefill::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

#[allow(dead_code)]
fn node(id: &str, label: &str, fields: &[(&str, &str)]) -> FormNode {
    FormNode {
        id: id.to_string(),
        label: label.to_string(),
        fields: fields
            .iter()
            .map(|(field_id, name)| FormField::new(field_id, name, "string"))
            .collect(),
        component_id: format!("f_{}", id.to_lowercase()),
        position: Position::default(),
    }
}

#[allow(dead_code)]
fn edge(source: &str, target: &str) -> FormEdge {
    FormEdge {
        id: format!("e{}-{}", source, target),
        source: source.to_string(),
        target: target.to_string(),
    }
}

/// The chain `A -> B -> C`.
///
/// A: a_email, a_name; B: b_address, b_phone; C: c_notes
#[allow(dead_code)]
pub fn create_chain_graph() -> FormGraph {
    FormGraph {
        id: "chain".to_string(),
        name: "Chain".to_string(),
        nodes: vec![
            node("A", "Form A", &[("a_email", "Email"), ("a_name", "Name")]),
            node("B", "Form B", &[("b_address", "Address"), ("b_phone", "Phone")]),
            node("C", "Form C", &[("c_notes", "Notes")]),
        ],
        edges: vec![edge("A", "B"), edge("B", "C")],
    }
}

/// `A -> B -> D`, `A -> C -> D`, `A -> D`, `E -> B`.
///
/// From D, A is both one and two steps away; E is only two steps away.
#[allow(dead_code)]
pub fn create_diamond_graph() -> FormGraph {
    FormGraph {
        id: "diamond".to_string(),
        name: "Diamond".to_string(),
        nodes: vec![
            node("A", "Form A", &[("a_email", "Email")]),
            node("B", "Form B", &[("b_id", "Identifier")]),
            node("C", "Form C", &[("c_id", "Identifier")]),
            node("D", "Form D", &[("d_email", "Email")]),
            node("E", "Form E", &[("e_code", "Code")]),
        ],
        edges: vec![
            edge("A", "B"),
            edge("B", "D"),
            edge("A", "C"),
            edge("C", "D"),
            edge("A", "D"),
            edge("E", "B"),
        ],
    }
}

/// `A -> B -> C -> A` plus `C -> D`.
#[allow(dead_code)]
pub fn create_cyclic_graph() -> FormGraph {
    FormGraph {
        id: "cycle".to_string(),
        name: "Cycle".to_string(),
        nodes: vec![
            node("A", "Form A", &[("a_1", "One")]),
            node("B", "Form B", &[("b_1", "One")]),
            node("C", "Form C", &[("c_1", "One")]),
            node("D", "Form D", &[("d_1", "One")]),
        ],
        edges: vec![edge("A", "B"), edge("B", "C"), edge("C", "A"), edge("C", "D")],
    }
}

/// A blueprint payload in the API's shape.
///
/// `form-c` has no position and references a form that does not exist; the
/// second edge has no id.
#[allow(dead_code)]
pub const GRAPH_JSON: &str = r#"{
  "id": "bp_01",
  "name": "Onboarding",
  "nodes": [
    {
      "id": "form-a",
      "type": "form",
      "position": { "x": 10, "y": 20 },
      "data": { "id": "bp_c-a", "component_key": "form-a", "component_type": "form", "component_id": "f_1", "name": "Form A" }
    },
    {
      "id": "form-b",
      "type": "form",
      "position": { "x": 300, "y": 20 },
      "data": { "component_id": "f_2", "name": "Form B" }
    },
    {
      "id": "form-c",
      "type": "form",
      "data": { "component_id": "f_missing", "name": "Form C" }
    }
  ],
  "edges": [
    { "id": "edge-1", "source": "form-a", "target": "form-b" },
    { "source": "form-b", "target": "form-c" }
  ],
  "forms": [
    {
      "id": "f_1",
      "name": "Contact",
      "field_schema": {
        "type": "object",
        "properties": {
          "name": { "title": "Name", "type": "string", "avantos_type": "short-text" },
          "email": { "title": "Email", "type": "string", "format": "email" },
          "dynamic_checkbox_group": {
            "type": "array",
            "avantos_type": "checkbox-group",
            "items": { "enum": ["foo", "bar"], "type": "string" }
          }
        },
        "required": ["name"]
      }
    },
    {
      "id": "f_2",
      "name": "Address",
      "field_schema": {
        "type": "object",
        "properties": {
          "street": { "title": "Street", "type": "string" }
        }
      }
    }
  ]
}"#;

/// Serves one HTTP response on a loopback port and returns the base URL.
#[allow(dead_code)]
pub fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 8192];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    format!("http://{}", addr)
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}
