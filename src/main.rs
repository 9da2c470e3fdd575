mod app;
mod bus;
mod config;
mod graph;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the JSON graph description to load.
    #[arg(long, default_value = "graph.json")]
    graph: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "graph-sondá",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GraphSondaApp::new(cc, args.graph.clone())))
        }),
    )
}
