use anyhow::{Context, Result};
use serde::Deserialize;

use super::model::{GraphData, GraphLink, GraphNode};

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
    id: String,
    x: f32,
    y: f32,
    #[serde(default)]
    size: Option<f32>,
    #[serde(default)]
    color: Option<u32>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawLink {
    from: String,
    to: String,
    weight: f32,
    #[serde(default)]
    color: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

/// Parses a JSON graph description into validated graph data. A node without
/// a position, a duplicate id, or a link naming an unknown endpoint is a
/// fatal load error, never partial data.
pub fn parse_graph_text(raw: &str) -> Result<GraphData> {
    let parsed: RawGraph =
        serde_json::from_str(raw).context("invalid graph description JSON")?;

    let nodes = parsed
        .nodes
        .into_iter()
        .map(|raw| GraphNode {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            size: raw.size,
            color: raw.color,
            name: raw.name,
        })
        .collect::<Vec<_>>();

    let links = parsed
        .links
        .into_iter()
        .map(|raw| GraphLink {
            from: raw.from,
            to: raw.to,
            weight: raw.weight,
            color: raw.color,
        })
        .collect::<Vec<_>>();

    GraphData::from_parts(nodes, links).context("invalid graph description")
}
