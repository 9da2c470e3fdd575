use std::fs;

use anyhow::{Context, Result};

use super::model::GraphData;
use super::parse::parse_graph_text;

/// Reads and parses a graph description from disk. Runs on the background
/// load thread; the caller observes completion through its channel.
pub fn fetch_graph(source: &str) -> Result<GraphData> {
    let raw = fs::read_to_string(source)
        .with_context(|| format!("failed to read graph description {source}"))?;

    let graph = parse_graph_text(&raw)
        .with_context(|| format!("failed to parse graph description {source}"))?;

    log::info!(
        "loaded graph from {source}: {} nodes, {} links",
        graph.node_count(),
        graph.link_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_the_source() {
        let error = fetch_graph("/definitely/not/here.json").unwrap_err();
        assert!(format!("{error:#}").contains("/definitely/not/here.json"));
    }
}
