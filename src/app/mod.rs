use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::bus::{Bus, SceneEvent, TooltipPayload};
use crate::graph::{GraphData, fetch_graph};

mod highlight;
mod render_utils;
mod scene;
mod spatial;
mod surface;
mod ui;

use self::spatial::SpatialIndex;
use self::surface::{CollectionId, PrimitiveHandle, Surface};

pub struct GraphSondaApp {
    graph_path: String,
    bus: Bus,
    bus_rx: Receiver<SceneEvent>,
    state: AppState,
    reload_rx: Option<Receiver<Result<GraphData, String>>>,
    tooltip: Option<TooltipPayload>,
}

/// One loaded graph per `Ready` value; a reload builds a fresh scene and
/// drops the old one wholesale, so no derived state can leak across loads.
enum AppState {
    Loading {
        rx: Receiver<Result<GraphData, String>>,
    },
    Ready(Box<GraphScene>),
    Error(String),
}

/// Owns everything derived from one loaded graph: the render surface and
/// its collections, the spatial index, the handles of per-node/per-link
/// base visual records, and the side-panel selection. Handle vectors are
/// parallel to the graph's node and link order.
struct GraphScene {
    graph: Arc<GraphData>,
    bus: Bus,
    surface: Surface,
    index: SpatialIndex,
    base_lines: CollectionId,
    base_points: CollectionId,
    highlight_lines: CollectionId,
    highlight_points: CollectionId,
    node_handles: Vec<PrimitiveHandle>,
    link_handles: Vec<PrimitiveHandle>,
    search: String,
    selected: Option<String>,
    show_index_overlay: bool,
}

struct NodeSummary {
    id: String,
    name: Option<String>,
    image: String,
}

struct RelatedEntry {
    summary: NodeSummary,
    score: f32,
}

struct NodeDetails {
    main: NodeSummary,
    related: Vec<RelatedEntry>,
}

impl GraphSondaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: String) -> Self {
        let bus = Bus::new();
        let bus_rx = bus.subscribe();
        Self {
            state: Self::start_load(graph_path.clone()),
            graph_path,
            bus,
            bus_rx,
            reload_rx: None,
            tooltip: None,
        }
    }

    fn spawn_load(graph_path: String) -> Receiver<Result<GraphData, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = fetch_graph(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }

    fn pump_bus(&mut self) {
        while let Ok(event) = self.bus_rx.try_recv() {
            match event {
                SceneEvent::GraphReady(graph) => {
                    log::info!(
                        "graph ready: {} nodes, {} links",
                        graph.node_count(),
                        graph.link_count()
                    );
                }
                SceneEvent::FocusNode { id, recenter } => {
                    if let AppState::Ready(scene) = &mut self.state {
                        scene.focus(&id, recenter);
                        scene.set_selected(Some(id));
                    }
                }
                SceneEvent::ShowTooltip(payload) => self.tooltip = payload,
                SceneEvent::LoadGraph(graph) => {
                    if self.reload_rx.is_some() {
                        log::warn!("ignoring load-graph event while a load is pending");
                        continue;
                    }
                    if let AppState::Ready(scene) = &mut self.state {
                        scene.dispose();
                    }
                    self.tooltip = None;
                    self.state =
                        AppState::Ready(Box::new(GraphScene::new(graph, self.bus.clone())));
                }
            }
        }
    }
}

impl eframe::App for GraphSondaApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(graph) => AppState::Ready(Box::new(GraphScene::new(
                            Arc::new(graph),
                            self.bus.clone(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading graph description...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load graph description");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.graph_path.clone()));
                    }
                });
            }
            AppState::Ready(scene) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                scene.show(ctx, &self.graph_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.graph_path.clone()));
                }

                // A finished reload goes back through the bus so it takes
                // the same path as any externally supplied graph.
                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(graph)) => {
                            self.bus.publish(SceneEvent::LoadGraph(Arc::new(graph)));
                        }
                        Ok(Err(error)) => {
                            transition = Some(AppState::Error(error));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            if let AppState::Ready(scene) = &mut self.state {
                scene.dispose();
            }
            self.reload_rx = None;
            self.tooltip = None;
            self.state = next_state;
        }

        self.pump_bus();
        self.draw_tooltip(ctx);

        if let AppState::Ready(scene) = &mut self.state
            && scene.surface.take_frame_requests() > 0
        {
            ctx.request_repaint();
        }
    }
}
