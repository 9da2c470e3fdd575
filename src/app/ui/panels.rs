use eframe::egui::{self, Context, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::bus::SceneEvent;
use crate::util::{display_name, ellipsize};

use super::super::GraphScene;

const SEARCH_RESULT_LIMIT: usize = 20;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl GraphScene {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        graph_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("graph-sondá");
                    ui.separator();
                    ui.label(format!("source: {graph_path}"));
                    ui.label(format!("nodes: {}", self.graph.node_count()));
                    ui.label(format!("links: {}", self.graph.link_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.checkbox(&mut self.show_index_overlay, "Index boxes");
                });
            });

        egui::SidePanel::right("inspector")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.draw_search(ui);
                ui.separator();
                self.draw_details(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading graph description...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        self.selected = selected;
    }

    /// Fuzzy name search over the loaded graph. A result click goes through
    /// the bus like any other focus trigger, recentering on arrival.
    fn draw_search(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Find node").strong());
        ui.text_edit_singleline(&mut self.search);

        let query = self.search.trim();
        if query.is_empty() {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut matches = self
            .graph
            .nodes()
            .filter_map(|node| {
                fuzzy_match_score(&matcher, display_name(node), query).map(|score| (score, node))
            })
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.truncate(SEARCH_RESULT_LIMIT);

        if matches.is_empty() {
            ui.small("No matching nodes.");
            return;
        }

        for (_score, node) in matches {
            if ui
                .link(ellipsize(display_name(node), 48))
                .on_hover_text(node.id.as_str())
                .clicked()
            {
                self.bus.publish(SceneEvent::FocusNode {
                    id: node.id.clone(),
                    recenter: true,
                });
            }
        }
    }
}
