//! Retained render surface. Owns the primitive collections in draw order,
//! the world-space view box, and the clear color; egui paints it once per
//! frame. Pointer input is turned into world-space events polled by the
//! scene, and repaint demand is accumulated as frame requests drained by
//! the app loop.

mod collection;

use eframe::egui::{Painter, PointerButton, Pos2, Rect, Response, Stroke, Ui, vec2};

use super::render_utils::{screen_to_world, unpack_color, world_to_screen};

pub(in crate::app) use collection::{
    LineCollection, LineRecord, PointCollection, PointRecord, PrimitiveHandle,
};

const MIN_VIEW_EXTENT: f32 = 1.0;
const MAX_VIEW_EXTENT: f32 = 1.0e6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ViewBox {
    pub fn centered(center_x: f32, center_y: f32, half_extent: f32) -> Self {
        Self {
            left: center_x - half_extent,
            top: center_y - half_extent,
            right: center_x + half_extent,
            bottom: center_y + half_extent,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollectionId(u32);

enum Layer {
    Points(PointCollection),
    Lines { collection: LineCollection, width: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Click,
}

/// Pointer activity translated into world coordinates. `screen` keeps the
/// raw device position for UI chrome anchored in screen space.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub screen: Pos2,
}

pub struct Surface {
    layers: Vec<(CollectionId, Layer)>,
    next_collection: u32,
    clear_color: u32,
    view_box: ViewBox,
    frame_requests: usize,
    last_pointer: Option<Pos2>,
}

impl Surface {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            next_collection: 0,
            clear_color: 0x000000FF,
            view_box: ViewBox::centered(0.0, 0.0, 1.0),
            frame_requests: 0,
            last_pointer: None,
        }
    }

    pub fn set_clear_color(&mut self, color: u32) {
        self.clear_color = color;
    }

    pub fn set_view_box(&mut self, view_box: ViewBox) {
        self.view_box = view_box;
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Appends a point collection; later appends draw on top.
    pub fn add_points(&mut self, capacity: usize) -> CollectionId {
        self.push_layer(Layer::Points(PointCollection::with_capacity(capacity)))
    }

    pub fn add_lines(&mut self, capacity: usize, width: f32) -> CollectionId {
        self.push_layer(Layer::Lines {
            collection: LineCollection::with_capacity(capacity),
            width,
        })
    }

    fn push_layer(&mut self, layer: Layer) -> CollectionId {
        let id = CollectionId(self.next_collection);
        self.next_collection += 1;
        self.layers.push((id, layer));
        id
    }

    pub fn remove_collection(&mut self, id: CollectionId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|(layer_id, _)| *layer_id != id);
        self.layers.len() != before
    }

    pub fn points_mut(&mut self, id: CollectionId) -> Option<&mut PointCollection> {
        self.layers.iter_mut().find_map(|(layer_id, layer)| {
            match layer {
                Layer::Points(collection) if *layer_id == id => Some(collection),
                _ => None,
            }
        })
    }

    pub fn lines_mut(&mut self, id: CollectionId) -> Option<&mut LineCollection> {
        self.layers.iter_mut().find_map(|(layer_id, layer)| {
            match layer {
                Layer::Lines { collection, .. } if *layer_id == id => Some(collection),
                _ => None,
            }
        })
    }

    pub fn points(&self, id: CollectionId) -> Option<&PointCollection> {
        self.layers.iter().find_map(|(layer_id, layer)| {
            match layer {
                Layer::Points(collection) if *layer_id == id => Some(collection),
                _ => None,
            }
        })
    }

    pub fn lines(&self, id: CollectionId) -> Option<&LineCollection> {
        self.layers.iter().find_map(|(layer_id, layer)| {
            match layer {
                Layer::Lines { collection, .. } if *layer_id == id => Some(collection),
                _ => None,
            }
        })
    }

    pub fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    pub fn take_frame_requests(&mut self) -> usize {
        std::mem::take(&mut self.frame_requests)
    }

    /// Pointer-centered zoom, adapted from scroll input to the view box.
    pub fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let anchor = screen_to_world(rect, self.view_box, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        let current_half_width = self.view_box.width() * 0.5;
        let half_width =
            (current_half_width / zoom_factor).clamp(MIN_VIEW_EXTENT, MAX_VIEW_EXTENT);
        if (half_width - current_half_width).abs() <= f32::EPSILON {
            return;
        }
        let scale = half_width / current_half_width;

        self.view_box = ViewBox {
            left: anchor.x - (anchor.x - self.view_box.left) * scale,
            top: anchor.y - (anchor.y - self.view_box.top) * scale,
            right: anchor.x + (self.view_box.right - anchor.x) * scale,
            bottom: anchor.y + (self.view_box.bottom - anchor.y) * scale,
        };
        self.request_frame();
    }

    pub fn handle_pan(&mut self, rect: Rect, response: &Response) {
        if !(response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle))
        {
            return;
        }

        let delta = response.drag_delta();
        if delta == vec2(0.0, 0.0) {
            return;
        }

        let dx = -delta.x * self.view_box.width() / rect.width().max(1.0);
        let dy = -delta.y * self.view_box.height() / rect.height().max(1.0);
        self.view_box = ViewBox {
            left: self.view_box.left + dx,
            top: self.view_box.top + dy,
            right: self.view_box.right + dx,
            bottom: self.view_box.bottom + dy,
        };
        self.request_frame();
    }

    /// Drains this frame's pointer activity as world-space events. Move
    /// events fire only when the pointer actually moved.
    pub fn pointer_events(&mut self, rect: Rect, response: &Response) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        match response.hover_pos() {
            Some(screen) => {
                if self.last_pointer != Some(screen) {
                    self.last_pointer = Some(screen);
                    let world = screen_to_world(rect, self.view_box, screen);
                    events.push(PointerEvent {
                        kind: PointerKind::Move,
                        x: world.x,
                        y: world.y,
                        screen,
                    });
                }
            }
            None => self.last_pointer = None,
        }

        if response.clicked_by(PointerButton::Primary)
            && let Some(screen) = response.interact_pointer_pos()
        {
            let world = screen_to_world(rect, self.view_box, screen);
            events.push(PointerEvent {
                kind: PointerKind::Click,
                x: world.x,
                y: world.y,
                screen,
            });
        }

        events
    }

    pub fn render(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, unpack_color(self.clear_color));

        let scale = rect.width() / self.view_box.width().max(f32::EPSILON);

        for (_, layer) in &self.layers {
            match layer {
                Layer::Lines { collection, width } => {
                    for record in collection.iter() {
                        let from = world_to_screen(
                            rect,
                            self.view_box,
                            vec2(record.from[0], record.from[1]),
                        );
                        let to = world_to_screen(
                            rect,
                            self.view_box,
                            vec2(record.to[0], record.to[1]),
                        );
                        painter.line_segment(
                            [from, to],
                            Stroke::new(*width, unpack_color(record.color)),
                        );
                    }
                }
                Layer::Points(collection) => {
                    for record in collection.iter() {
                        let center = world_to_screen(
                            rect,
                            self.view_box,
                            vec2(record.position[0], record.position[1]),
                        );
                        let radius = (record.size * 0.5 * scale).max(1.0);
                        painter.circle_filled(center, radius, unpack_color(record.color));
                    }
                }
            }
        }
    }
}
