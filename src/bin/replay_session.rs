//! Replay a recorded editing session
//!
//! Reads a JSON array of input events, feeds it through a fresh mind map and
//! prints the final render view as JSON on stdout.
//!
//! Usage: replay-session <script.json> [config.json]

use std::fs;

use anyhow::{bail, Context, Result};
use cim_domain_mindmap::{EditorConfig, InputEvent, MindMap};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next() else {
        bail!("usage: replay-session <script.json> [config.json]");
    };

    let config = match args.next() {
        Some(path) => EditorConfig::from_path(&path)
            .with_context(|| format!("loading config {path}"))?,
        None => EditorConfig::default(),
    };

    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("reading script {script_path}"))?;
    let inputs: Vec<InputEvent> = serde_json::from_str(&script)
        .with_context(|| format!("parsing script {script_path}"))?;

    let map = MindMap::new(config);
    info!(graph_id = %map.id(), inputs = inputs.len(), "replaying session");

    let (map, events) = map.replay(inputs);
    info!(
        events = events.len(),
        nodes = map.store().node_count(),
        edges = map.store().edge_count(),
        "session replayed"
    );

    println!("{}", serde_json::to_string_pretty(&map.view())?);
    Ok(())
}
