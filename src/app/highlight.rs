//! Focus highlighting: bounded overlay collections cleared and repopulated
//! atomically on every focus change. Records inserted here are copies of
//! the base visual state; the base collections are never touched.

use crate::config;

use super::GraphScene;
use super::surface::ViewBox;

impl GraphScene {
    pub(in crate::app) fn clear_highlights(&mut self) {
        if let Some(points) = self.surface.points_mut(self.highlight_points) {
            points.clear();
        }
        if let Some(lines) = self.surface.lines_mut(self.highlight_lines) {
            lines.clear();
        }
    }

    /// Emphasizes `node_id` and its direct neighborhood: the focused node
    /// enlarged in the focus color, every linked node in the neighbor
    /// color, every incident link in the highlight color. One frame is
    /// requested after all insertions.
    ///
    /// Callers must pass an id from the currently loaded graph; anything
    /// else leaves the highlights cleared.
    pub(in crate::app) fn focus(&mut self, node_id: &str, recenter: bool) {
        self.clear_highlights();

        let Some(node_index) = self.graph.index_of(node_id) else {
            log::warn!("focus requested for unknown node {node_id}");
            return;
        };

        let base_points = self
            .surface
            .points(self.base_points)
            .expect("base point collection registered");
        let base_lines = self
            .surface
            .lines(self.base_lines)
            .expect("base line collection registered");

        let mut focused = *base_points
            .get(self.node_handles[node_index])
            .expect("base record for every live node");
        focused.color = config::FOCUS_NODE_COLOR;
        focused.size *= config::FOCUS_SIZE_SCALE;

        let mut neighbor_records = Vec::new();
        let mut link_records = Vec::new();
        for (other, _link, link_index) in self.graph.linked(node_id) {
            let other_index = self
                .graph
                .index_of(&other.id)
                .expect("link endpoints validated at load");
            let mut neighbor = *base_points
                .get(self.node_handles[other_index])
                .expect("base record for every live node");
            neighbor.color = config::NEIGHBOR_NODE_COLOR;
            neighbor_records.push(neighbor);

            let mut line = *base_lines
                .get(self.link_handles[link_index])
                .expect("base record for every live link");
            line.color = config::HIGHLIGHT_LINK_COLOR;
            link_records.push(line);
        }

        {
            let points = self
                .surface
                .points_mut(self.highlight_points)
                .expect("highlight point collection registered");
            points.add(focused);
            for record in neighbor_records {
                points.add(record);
            }
        }

        {
            let lines = self
                .surface
                .lines_mut(self.highlight_lines)
                .expect("highlight line collection registered");
            for record in link_records {
                lines.add(record);
            }
        }

        if recenter
            && let Some(focused_node) = self.graph.node(node_id)
        {
            self.surface.set_view_box(ViewBox::centered(
                focused_node.x,
                focused_node.y,
                config::FOCUS_VIEW_MARGIN,
            ));
        }

        self.surface.request_frame();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::bus::Bus;
    use crate::graph::{GraphData, GraphLink, GraphNode};

    use super::super::GraphScene;

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

    fn chain_scene() -> GraphScene {
        // a - b - c, plus a lone node far away.
        let graph = GraphData::from_parts(
            vec![
                node("a", 0.0, 0.0),
                node("b", 10.0, 0.0),
                node("c", 20.0, 0.0),
                node("lone", 100.0, 100.0),
            ],
            vec![link("a", "b", 1.0), link("b", "c", 0.5)],
        )
        .unwrap();
        GraphScene::new(Arc::new(graph), Bus::new())
    }

    fn highlight_point_colors(scene: &GraphScene) -> Vec<u32> {
        scene
            .surface
            .points(scene.highlight_points)
            .unwrap()
            .iter()
            .map(|record| record.color)
            .collect()
    }

    #[test]
    fn focus_builds_focused_plus_neighborhood() {
        let mut scene = chain_scene();
        scene.focus("b", false);

        let points = scene.surface.points(scene.highlight_points).unwrap();
        assert_eq!(points.len(), 3); // b plus neighbors a and c

        let focused = points
            .iter()
            .find(|record| record.color == crate::config::FOCUS_NODE_COLOR)
            .unwrap();
        assert_eq!(focused.position, [10.0, 0.0, 0.0]);
        assert_eq!(focused.size, crate::config::NODE_SIZE * 1.2);

        let neighbor_count = points
            .iter()
            .filter(|record| record.color == crate::config::NEIGHBOR_NODE_COLOR)
            .count();
        assert_eq!(neighbor_count, 2);

        let lines = scene.surface.lines(scene.highlight_lines).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines
            .iter()
            .all(|record| record.color == crate::config::HIGHLIGHT_LINK_COLOR));
    }

    #[test]
    fn refocus_leaves_no_residue_from_prior_focus() {
        let mut scene = chain_scene();
        scene.focus("a", false);
        scene.focus("c", false);

        let points = scene.surface.points(scene.highlight_points).unwrap();
        assert_eq!(points.len(), 2); // c plus neighbor b

        let positions = points
            .iter()
            .map(|record| (record.position[0], record.position[1]))
            .collect::<Vec<_>>();
        assert!(positions.contains(&(20.0, 0.0)));
        assert!(positions.contains(&(10.0, 0.0)));
        assert!(!positions.contains(&(0.0, 0.0))); // a is gone

        assert_eq!(scene.surface.lines(scene.highlight_lines).unwrap().len(), 1);
    }

    #[test]
    fn focus_on_leaf_node_highlights_only_itself() {
        let mut scene = chain_scene();
        scene.focus("lone", false);

        assert_eq!(highlight_point_colors(&scene), vec![crate::config::FOCUS_NODE_COLOR]);
        assert!(scene.surface.lines(scene.highlight_lines).unwrap().is_empty());
    }

    #[test]
    fn focus_does_not_mutate_base_records() {
        let mut scene = chain_scene();
        let handle = scene.node_handles[1];
        let base_before = *scene.surface.points(scene.base_points).unwrap().get(handle).unwrap();

        scene.focus("b", false);

        let stored = *scene.surface.points(scene.base_points).unwrap().get(handle).unwrap();
        assert_eq!(stored, base_before);
        assert_eq!(stored.color, crate::config::BASE_NODE_COLOR);
    }

    #[test]
    fn clear_highlights_is_idempotent() {
        let mut scene = chain_scene();
        scene.focus("b", false);

        scene.clear_highlights();
        scene.clear_highlights();

        assert!(scene.surface.points(scene.highlight_points).unwrap().is_empty());
        assert!(scene.surface.lines(scene.highlight_lines).unwrap().is_empty());
    }

    #[test]
    fn focus_requests_exactly_one_frame() {
        let mut scene = chain_scene();
        scene.surface.take_frame_requests(); // drain the load-time request

        scene.focus("b", false);
        assert_eq!(scene.surface.take_frame_requests(), 1);
    }

    #[test]
    fn focus_with_recenter_moves_the_view_box() {
        let mut scene = chain_scene();
        scene.focus("c", true);

        let view_box = scene.surface.view_box();
        assert_eq!(view_box.left, 20.0 - crate::config::FOCUS_VIEW_MARGIN);
        assert_eq!(view_box.right, 20.0 + crate::config::FOCUS_VIEW_MARGIN);
        assert_eq!(view_box.top, 0.0 - crate::config::FOCUS_VIEW_MARGIN);
        assert_eq!(view_box.bottom, 0.0 + crate::config::FOCUS_VIEW_MARGIN);
    }

    #[test]
    fn focus_without_recenter_keeps_the_view_box() {
        let mut scene = chain_scene();
        let before = scene.surface.view_box();
        scene.focus("b", false);
        assert_eq!(scene.surface.view_box(), before);
    }

    #[test]
    fn focus_on_unknown_id_leaves_highlights_empty() {
        let mut scene = chain_scene();
        scene.focus("b", false);
        scene.focus("ghost", false);

        assert!(scene.surface.points(scene.highlight_points).unwrap().is_empty());
        assert!(scene.surface.lines(scene.highlight_lines).unwrap().is_empty());
    }
}
