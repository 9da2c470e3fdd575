use eframe::egui::{self, Context, RichText, pos2};

use crate::util::{display_name, ellipsize};

use super::super::{AppState, GraphSondaApp};

impl GraphSondaApp {
    /// Renders the hover tooltip published by the scene. Chrome only: the
    /// scene never knows whether anything listens.
    pub(in crate::app) fn draw_tooltip(&self, ctx: &Context) {
        let Some(tooltip) = &self.tooltip else {
            return;
        };
        let AppState::Ready(scene) = &self.state else {
            return;
        };
        let Some(node) = scene.graph().node(&tooltip.node_id) else {
            return;
        };

        egui::Area::new(egui::Id::new("node_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(pos2(tooltip.screen_x + 14.0, tooltip.screen_y + 14.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(display_name(node)).strong());
                    if node.name.is_some() {
                        ui.small(ellipsize(&node.id, 40));
                    }
                });
            });
    }
}
