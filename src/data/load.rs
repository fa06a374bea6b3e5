use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::model::NetworkGraph;
use super::parse::parse_network_json;

pub fn load_network(path: &str) -> Result<NetworkGraph> {
    let raw = fs::read_to_string(Path::new(path))
        .with_context(|| format!("failed to read network dataset from {path}"))?;

    let (nodes, edges) = parse_network_json(&raw)
        .with_context(|| format!("failed to parse network dataset from {path}"))?;

    let graph = NetworkGraph::build(nodes, edges)
        .with_context(|| format!("inconsistent network dataset in {path}"))?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        path,
        "loaded network dataset"
    );

    Ok(graph)
}
