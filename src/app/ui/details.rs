use eframe::egui::{self, RichText, Ui};

use crate::bus::SceneEvent;
use crate::util::ellipsize;

use super::super::GraphScene;

impl GraphScene {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Node Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Hover to inspect, click to focus a node.");
            return;
        };

        let Some(details) = self.details(&selected_id) else {
            ui.label("Focused node no longer exists in the loaded graph.");
            return;
        };

        let title = details
            .main
            .name
            .clone()
            .unwrap_or_else(|| details.main.id.clone());
        ui.label(RichText::new(title).strong());
        ui.small(ellipsize(&details.main.id, 52));
        ui.label(format!("image: {}", details.main.image));

        ui.separator();
        ui.label(RichText::new("Related nodes").strong());
        if details.related.is_empty() {
            ui.label("No links touch this node.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("related_nodes_scroll")
            .max_height(320.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for related in &details.related {
                    let label = format!(
                        "{}  ({:.2})",
                        related.summary.name.as_deref().unwrap_or(&related.summary.id),
                        related.score
                    );

                    if ui
                        .link(label)
                        .on_hover_text(related.summary.id.as_str())
                        .clicked()
                    {
                        self.bus.publish(SceneEvent::FocusNode {
                            id: related.summary.id.clone(),
                            recenter: true,
                        });
                    }
                }
            });
    }
}
