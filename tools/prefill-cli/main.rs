use clap::Parser;
use prefill::prefill::{PrefillResolverBuilder, create_provider_by_name};
use prefill::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Browse a form graph and configure prefill sources for its fields
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read the graph payload from a JSON file instead of the API
    #[arg(short, long)]
    file: Option<String>,
    /// API origin (defaults to $PREFILL_API_URL, then http://localhost:3000)
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    namespace: Option<String>,
    #[arg(long)]
    blueprint: Option<String>,

    /// Target node id for candidate listing
    #[arg(long)]
    node: Option<String>,
    /// Target field id for candidate listing
    #[arg(long, requires = "node")]
    field: Option<String>,
    /// Comma-separated prefill providers to use, in order (direct, transitive, global)
    #[arg(long, value_delimiter = ',')]
    sources: Vec<String>,
    /// Print candidates as JSON
    #[arg(long)]
    json: bool,

    /// Run in interactive mode
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let resolver = build_resolver(&cli.sources);
    let mut editor = PrefillEditor::new(resolver);
    load_graph(&mut editor, &cli).await;

    if cli.human {
        run_interactive(&mut editor, &cli).await;
    } else {
        run_non_interactive(&editor, &cli);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_resolver(sources: &[String]) -> PrefillResolver {
    if sources.is_empty() {
        return PrefillResolver::default();
    }
    sources
        .iter()
        .fold(PrefillResolverBuilder::empty(), |builder, name| {
            let provider = create_provider_by_name(name.trim()).unwrap_or_else(|| {
                exit_with_error(&format!(
                    "Unknown prefill source '{}'. Expected direct, transitive or global.",
                    name
                ))
            });
            builder.with_provider(provider)
        })
        .build()
}

fn build_client(cli: &Cli) -> GraphClient {
    let mut builder = GraphClient::builder();
    if let Some(url) = &cli.url {
        builder = builder.base_url(url);
    }
    if let Some(namespace) = &cli.namespace {
        builder = builder.namespace(namespace);
    }
    if let Some(blueprint) = &cli.blueprint {
        builder = builder.blueprint(blueprint);
    }
    builder
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to create client: {}", e)))
}

/// Fills the editor from the file or the API.
async fn load_graph(editor: &mut PrefillEditor, cli: &Cli) {
    let start = Instant::now();
    let state = match &cli.file {
        Some(path) => {
            let body = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read graph file '{}': {}", path, e))
            });
            editor.finish_loading(parse_graph_response(&body))
        }
        None => {
            let client = build_client(cli);
            println!("Loading graph from: {}", client.config().graph_url());
            editor.load(&client).await
        }
    };
    match state {
        LoadState::Ready => println!("Graph loaded in {:?}", start.elapsed()),
        LoadState::Failed(message) if cli.human => println!("Error: {} (type 'retry')", message),
        LoadState::Failed(message) => exit_with_error(message),
        LoadState::Loading => {}
    }
}

fn run_non_interactive(editor: &PrefillEditor, cli: &Cli) {
    let Some(graph) = editor.graph() else {
        exit_with_error("Graph is not loaded.");
    };

    let Some(node_id) = &cli.node else {
        println!("\n{}", TextFormatter::format_graph(graph));
        return;
    };
    let Some(node) = graph.node(node_id) else {
        exit_with_error(&format!("Node '{}' not found.", node_id));
    };

    let field_ids: Vec<&str> = match &cli.field {
        Some(field_id) => vec![field_id.as_str()],
        None => node.fields.iter().map(|f| f.id.as_str()).collect(),
    };

    for field_id in field_ids {
        let candidates = editor.candidates_for(&node.id, field_id);
        if cli.json {
            match serde_json::to_string_pretty(&candidates) {
                Ok(json) => println!("{}", json),
                Err(e) => exit_with_error(&format!("Failed to encode candidates: {}", e)),
            }
            continue;
        }
        println!("\n{} candidates for {}.{}:", candidates.len(), node.id, field_id);
        for option in &candidates {
            let tag = option
                .dependency
                .map(|d| d.to_string())
                .unwrap_or_else(|| option.source_kind.to_string());
            println!("  - {:<40} {} [{}]", option.id, option.label, tag);
        }
    }
}

const HELP: &str = "\
Commands:
  show                      Print the graph, panel and modal
  select <node>             Select a node and open its panel
  close                     Close the panel
  enable | disable          Toggle field configuration in the panel
  open <field>              Open the candidate browser for a field
  search [term]             Filter candidates (no term clears the search)
  toggle <group>            Expand or collapse a candidate group
  stage <option>            Stage a candidate
  unstage                   Drop the staged candidate
  confirm | cancel          Close the browser, storing the staged candidate or not
  outside                   Click outside the browser
  clear <field>             Remove the prefill of a field
  move <node> <x> <y>       Move a node
  connect <source> <target> Draw an edge
  disconnect <edge>         Remove an edge
  sources                   List the active prefill sources
  retry                     Reload the graph
  quit";

/// Runs the CLI as a small shell over the editor.
async fn run_interactive(editor: &mut PrefillEditor, cli: &Cli) {
    println!("--- Prefill Interactive Mode ---");
    println!("{}", HELP);

    loop {
        let line = prompt_for_input("prefill");
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        if command == "quit" || command == "exit" {
            break;
        }
        if command == "retry" {
            editor.retry();
            load_graph(editor, cli).await;
            continue;
        }
        if command == "help" {
            println!("{}", HELP);
            continue;
        }
        if !editor.is_ready() {
            println!("The graph is not loaded. Type 'retry' or 'quit'.");
            continue;
        }

        match (command, args.as_slice()) {
            ("show", _) => print_state(editor),
            ("select", [node_id]) => report(editor.select_node(node_id), "Node not found."),
            ("close", _) => editor.close_panel(),
            ("enable", _) | ("disable", _) => match editor.panel_mut() {
                Some(panel) => panel.set_enabled(command == "enable"),
                None => println!("No node selected."),
            },
            ("open", [field_id]) => report(
                editor.open_field(field_id),
                "Cannot open: no node selected, panel disabled, or unknown field.",
            ),
            ("search", terms) => with_modal(editor, |modal| {
                if terms.is_empty() {
                    modal.clear_search();
                } else {
                    modal.set_search(&terms.join(" "));
                }
            }),
            ("toggle", [key]) => with_modal(editor, |modal| {
                report(modal.toggle_group(key), "Unknown group.")
            }),
            ("stage", [option_id]) => with_modal(editor, |modal| {
                report(modal.stage(option_id), "Unknown candidate.")
            }),
            ("unstage", _) => with_modal(editor, |modal| modal.unstage()),
            ("sources", _) => println!("{}", editor.resolver().provider_names().join(", ")),
            ("confirm", _) => match editor.confirm_selection() {
                Some(binding) => println!("Prefilled from: {}", binding.describe()),
                None => println!("Nothing staged."),
            },
            ("cancel", _) => {
                if let Some(panel) = editor.panel_mut() {
                    panel.cancel_modal();
                }
            }
            ("outside", _) => {
                if let Some(panel) = editor.panel_mut() {
                    panel.click_modal(ClickTarget::Backdrop);
                }
            }
            ("clear", [field_id]) => report(editor.clear_field(field_id), "Nothing to clear."),
            ("move", [node_id, x, y]) => match (x.parse::<f64>(), y.parse::<f64>()) {
                (Ok(x), Ok(y)) => editor.apply_event(GraphEvent::NodeMoved {
                    node_id: node_id.to_string(),
                    position: Position { x, y },
                }),
                _ => println!("Coordinates must be numbers."),
            },
            ("connect", [source, target]) => editor.apply_event(GraphEvent::EdgeConnected {
                source: source.to_string(),
                target: target.to_string(),
            }),
            ("disconnect", [edge_id]) => editor.apply_event(GraphEvent::EdgeRemoved {
                edge_id: edge_id.to_string(),
            }),
            _ => println!("Unknown command or wrong arguments. Type 'help'."),
        }
    }
}

fn print_state(editor: &PrefillEditor) {
    let Some(graph) = editor.graph() else {
        return;
    };
    println!("{}", TextFormatter::format_graph(graph));
    if let Some(panel) = editor.panel() {
        println!("{}", TextFormatter::format_panel(panel, graph, editor.bindings()));
        if let Some(modal) = panel.modal() {
            println!("{}", TextFormatter::format_modal(modal));
        }
    }
}

fn with_modal(editor: &mut PrefillEditor, action: impl FnOnce(&mut CandidateModal)) {
    match editor.panel_mut().and_then(|p| p.modal_mut()) {
        Some(modal) => {
            action(&mut *modal);
            println!("{}", TextFormatter::format_modal(modal));
        }
        None => println!("No candidate browser open. Use 'open <field>'."),
    }
}

fn report(ok: bool, failure: &str) {
    if !ok {
        println!("{}", failure);
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();
    print!("{}> ", prompt_text);
    if io::stdout().flush().is_err() {
        exit_with_error("Failed to flush stdout");
    }
    match io::stdin().read_line(&mut line) {
        Ok(0) => "quit".to_string(),
        Ok(_) => line.trim().to_string(),
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
