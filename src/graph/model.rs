use std::collections::HashMap;

use anyhow::{Result, anyhow};

/// A vertex with a supplied 2D position and display attributes. Positions
/// are data, not simulation output.
#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: Option<f32>,
    pub color: Option<u32>,
    pub name: Option<String>,
}

/// A directed, weighted edge between two nodes.
#[derive(Clone, Debug)]
pub struct GraphLink {
    pub from: String,
    pub to: String,
    pub weight: f32,
    pub color: Option<u32>,
}

/// In-memory graph, fully constructed at load time. Incident-link lists are
/// precomputed in both directions so neighborhood traversal never scans the
/// whole link set.
#[derive(Debug)]
pub struct GraphData {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    index_by_id: HashMap<String, usize>,
    incident: Vec<Vec<usize>>,
}

impl GraphData {
    pub fn from_parts(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(anyhow!("node {} has a non-finite position", node.id));
            }
            if index_by_id.insert(node.id.clone(), index).is_some() {
                return Err(anyhow!("duplicate node id: {}", node.id));
            }
        }

        let mut incident = vec![Vec::new(); nodes.len()];
        for (link_index, link) in links.iter().enumerate() {
            let from = index_by_id
                .get(&link.from)
                .copied()
                .ok_or_else(|| anyhow!("link references unknown node: {}", link.from))?;
            let to = index_by_id
                .get(&link.to)
                .copied()
                .ok_or_else(|| anyhow!("link references unknown node: {}", link.to))?;

            incident[from].push(link_index);
            if to != from {
                incident[to].push(link_index);
            }
        }

        Ok(Self {
            nodes,
            links,
            index_by_id,
            incident,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    pub fn links(&self) -> impl Iterator<Item = &GraphLink> {
        self.links.iter()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node_at(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    /// Iterates over every link incident to `id` in either direction,
    /// yielding the other endpoint, the link, and the link's index.
    pub fn linked(&self, id: &str) -> impl Iterator<Item = (&GraphNode, &GraphLink, usize)> {
        let node_index = self.index_by_id.get(id).copied();

        node_index.into_iter().flat_map(move |index| {
            self.incident[index].iter().map(move |&link_index| {
                let link = &self.links[link_index];
                let other_id = if self.nodes[index].id == link.from {
                    &link.to
                } else {
                    &link.from
                };
                let other_index = self
                    .index_by_id
                    .get(other_id)
                    .copied()
                    .expect("link endpoints validated at load");
                (&self.nodes[other_index], link, link_index)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f32, y: f32) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            x,
            y,
            size: None,
            color: None,
            name: None,
        }
    }

    fn link(from: &str, to: &str, weight: f32) -> GraphLink {
        GraphLink {
            from: from.to_string(),
            to: to.to_string(),
            weight,
            color: None,
        }
    }

    #[test]
    fn counts_and_lookup() {
        let graph = GraphData::from_parts(
            vec![node("a", 0.0, 0.0), node("b", 1.0, 1.0)],
            vec![link("a", "b", 1.0)],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.node("a").unwrap().id, "a");
        assert!(graph.node("missing").is_none());
        assert_eq!(graph.index_of("b"), Some(1));
    }

    #[test]
    fn linked_is_direction_agnostic() {
        let graph = GraphData::from_parts(
            vec![node("a", 0.0, 0.0), node("b", 1.0, 0.0), node("c", 2.0, 0.0)],
            vec![link("a", "b", 0.5), link("c", "a", 0.7)],
        )
        .unwrap();

        let mut others = graph
            .linked("a")
            .map(|(other, _, _)| other.id.clone())
            .collect::<Vec<_>>();
        others.sort();
        assert_eq!(others, vec!["b", "c"]);

        let weights = graph
            .linked("b")
            .map(|(other, l, _)| (other.id.clone(), l.weight))
            .collect::<Vec<_>>();
        assert_eq!(weights, vec![("a".to_string(), 0.5)]);
    }

    #[test]
    fn linked_on_unknown_id_is_empty() {
        let graph = GraphData::from_parts(vec![node("a", 0.0, 0.0)], Vec::new()).unwrap();
        assert_eq!(graph.linked("nope").count(), 0);
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let result = GraphData::from_parts(
            vec![node("a", 0.0, 0.0), node("a", 1.0, 1.0)],
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_link_endpoint_is_rejected() {
        let result = GraphData::from_parts(
            vec![node("a", 0.0, 0.0)],
            vec![link("a", "ghost", 1.0)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let result = GraphData::from_parts(vec![node("a", f32::NAN, 0.0)], Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn self_loop_is_listed_once() {
        let graph = GraphData::from_parts(
            vec![node("a", 0.0, 0.0)],
            vec![link("a", "a", 1.0)],
        )
        .unwrap();
        assert_eq!(graph.linked("a").count(), 1);
    }
}
