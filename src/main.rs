use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use notegraph::graph::build_graph;
use notegraph::links::extract_links;
use notegraph::note::load_documents;
use notegraph::physics::{self, PhysicsConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory containing the Markdown notes.
    notes_dir: PathBuf,
    /// Simulation steps to run before printing the layout.
    #[arg(long, default_value_t = 300)]
    ticks: usize,
    /// JSON file overriding the default physics constants.
    #[arg(long)]
    physics_config: Option<PathBuf>,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct LayoutNode<'a> {
    id: &'a str,
    label: &'a str,
    degree: usize,
    pinned: bool,
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct Layout<'a> {
    nodes: Vec<LayoutNode<'a>>,
    edges: &'a [(usize, usize)],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.physics_config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read physics config {}", path.display()))?;
            serde_json::from_str::<PhysicsConfig>(&raw)
                .with_context(|| format!("invalid physics config {}", path.display()))?
        }
        None => PhysicsConfig::default(),
    };

    let documents = load_documents(&args.notes_dir)?;
    let links = extract_links(&documents);
    let graph = build_graph(&documents, &links);

    let mut nodes = graph.nodes.clone();
    for _ in 0..args.ticks {
        nodes = physics::step(&nodes, &graph.edges, &config);
    }

    let layout = Layout {
        nodes: nodes
            .iter()
            .map(|node| LayoutNode {
                id: &node.id,
                label: &node.label,
                degree: node.neighbor_count,
                pinned: node.pinned,
                x: node.position.x,
                y: node.position.y,
            })
            .collect(),
        edges: &graph.edges,
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&layout).context("failed to serialize layout")?
    } else {
        serde_json::to_string(&layout).context("failed to serialize layout")?
    };
    println!("{output}");

    Ok(())
}
