use std::sync::Arc;

use eframe::egui::{self, Color32, Sense, Stroke, Ui, pos2, vec2};

use crate::bus::{Bus, SceneEvent, TooltipPayload};
use crate::config;
use crate::graph::{GraphData, GraphNode};

use super::render_utils::{screen_to_world, world_to_screen};
use super::spatial::SpatialIndex;
use super::surface::{LineRecord, PointRecord, PointerEvent, PointerKind, Surface, ViewBox};
use super::{GraphScene, NodeDetails, NodeSummary, RelatedEntry};

impl GraphScene {
    /// Builds a scene for one loaded graph: base visual records for every
    /// node and link, highlight overlays on top, and a spatial index
    /// mirroring the node set. Publishes `GraphReady` once live.
    pub(in crate::app) fn new(graph: Arc<GraphData>, bus: Bus) -> Self {
        let mut surface = Surface::new();
        surface.set_clear_color(config::CLEAR_COLOR);
        surface.set_view_box(ViewBox::centered(0.0, 0.0, config::INITIAL_VIEW_EXTENT));

        // Draw order: base lines under base points, highlights on top.
        let base_lines = surface.add_lines(graph.link_count(), config::BASE_LINE_WIDTH);
        let base_points = surface.add_points(graph.node_count());
        let highlight_lines = surface.add_lines(16, config::HIGHLIGHT_LINE_WIDTH);
        let highlight_points = surface.add_points(16);

        let mut node_handles = Vec::with_capacity(graph.node_count());
        {
            let points = surface
                .points_mut(base_points)
                .expect("base point collection registered");
            for node in graph.nodes() {
                let record = PointRecord {
                    position: [node.x, node.y, 0.0],
                    size: node.size.unwrap_or(config::NODE_SIZE),
                    color: node.color.unwrap_or(config::BASE_NODE_COLOR),
                };
                node_handles.push(points.add(record));
            }
        }

        let mut link_handles = Vec::with_capacity(graph.link_count());
        {
            let lines = surface
                .lines_mut(base_lines)
                .expect("base line collection registered");
            for link in graph.links() {
                let from = graph.node(&link.from).expect("link endpoints validated at load");
                let to = graph.node(&link.to).expect("link endpoints validated at load");
                let record = LineRecord {
                    from: [from.x, from.y, 0.0],
                    to: [to.x, to.y, 0.0],
                    color: link.color.unwrap_or(config::BASE_LINK_COLOR),
                };
                link_handles.push(lines.add(record));
            }
        }

        let mut index = SpatialIndex::new();
        index.rebuild(
            graph.nodes().map(|node| (node.id.clone(), vec2(node.x, node.y))),
            config::NODE_SIZE,
        );
        if index.is_empty() {
            log::warn!("loaded graph has no nodes; pointer probing is inert");
        } else {
            log::debug!("spatial index rebuilt with {} entries", index.len());
        }

        surface.request_frame();
        bus.publish(SceneEvent::GraphReady(Arc::clone(&graph)));

        Self {
            graph,
            bus,
            surface,
            index,
            base_lines,
            base_points,
            highlight_lines,
            highlight_points,
            node_handles,
            link_handles,
            search: String::new(),
            selected: None,
            show_index_overlay: false,
        }
    }

    /// Releases the render-surface collections ahead of a replacement
    /// scene. Dropping the scene afterwards detaches it from the bus.
    pub(in crate::app) fn dispose(&mut self) {
        self.clear_highlights();
        self.surface.remove_collection(self.highlight_points);
        self.surface.remove_collection(self.highlight_lines);
        self.surface.remove_collection(self.base_points);
        self.surface.remove_collection(self.base_lines);
        self.node_handles.clear();
        self.link_handles.clear();
    }

    /// Live graph for external inspection; lifetime tied to this scene.
    pub(in crate::app) fn graph(&self) -> &GraphData {
        &self.graph
    }

    /// Two-stage hit test: coarse index lookup, then an exact distance
    /// gate. The index stores expanded boxes, so the box hit alone would
    /// produce false positives near node edges.
    pub(in crate::app) fn find_nearest(&self, x: f32, y: f32) -> Option<&str> {
        let entry = self.index.nearest_to(x, y)?;
        let dist = (vec2(x, y) - entry.point).length();
        (dist < config::NODE_SIZE / 2.0).then_some(entry.id.as_str())
    }

    fn handle_move(&self, event: &PointerEvent) {
        match self.find_nearest(event.x, event.y) {
            Some(id) => self.bus.publish(SceneEvent::ShowTooltip(Some(TooltipPayload {
                screen_x: event.screen.x,
                screen_y: event.screen.y,
                node_id: id.to_owned(),
            }))),
            None => self.bus.publish(SceneEvent::ShowTooltip(None)),
        }
    }

    fn handle_click(&self, event: &PointerEvent) {
        if let Some(id) = self.find_nearest(event.x, event.y) {
            self.bus.publish(SceneEvent::FocusNode {
                id: id.to_owned(),
                recenter: false,
            });
        }
    }

    pub(in crate::app) fn draw(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        self.surface.handle_zoom(ui, rect, &response);
        self.surface.handle_pan(rect, &response);

        for event in self.surface.pointer_events(rect, &response) {
            match event.kind {
                PointerKind::Move => self.handle_move(&event),
                PointerKind::Click => self.handle_click(&event),
            }
        }

        if let Some(pointer) = response.hover_pos() {
            let world = screen_to_world(rect, self.surface.view_box(), pointer);
            if self.find_nearest(world.x, world.y).is_some() {
                ui.output_mut(|output| {
                    output.cursor_icon = egui::CursorIcon::PointingHand;
                });
            }
        }

        let painter = ui.painter_at(rect);
        self.surface.render(&painter, rect);

        if self.show_index_overlay {
            let view_box = self.surface.view_box();
            let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(106, 198, 255, 110));
            for entry in self.index.entries() {
                let top_left = world_to_screen(rect, view_box, entry.min);
                let bottom_right = world_to_screen(rect, view_box, entry.max);
                let top_right = pos2(bottom_right.x, top_left.y);
                let bottom_left = pos2(top_left.x, bottom_right.y);

                painter.line_segment([top_left, top_right], stroke);
                painter.line_segment([top_right, bottom_right], stroke);
                painter.line_segment([bottom_right, bottom_left], stroke);
                painter.line_segment([bottom_left, top_left], stroke);
            }
        }
    }

    /// Focused node plus its direct neighbors, each scored by the incident
    /// link's weight, strongest first. Pure read.
    pub(in crate::app) fn details(&self, node_id: &str) -> Option<NodeDetails> {
        let main = self.graph.node(node_id).map(Self::summarize)?;

        let mut related = self
            .graph
            .linked(node_id)
            .map(|(other, link, _)| RelatedEntry {
                summary: Self::summarize(other),
                score: link.weight,
            })
            .collect::<Vec<_>>();
        related.sort_by(|a, b| b.score.total_cmp(&a.score));

        Some(NodeDetails { main, related })
    }

    fn summarize(node: &GraphNode) -> NodeSummary {
        NodeSummary {
            id: node.id.clone(),
            name: node.name.clone(),
            image: format!("{}{}.png", config::IMAGE_ENDPOINT, node.id),
        }
    }
}
