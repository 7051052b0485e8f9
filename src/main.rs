//! Flow Canvas - Main Entry Point
//!
//! Visual editor for automation flows: compose trigger, action, condition,
//! AI and integration steps on a pannable canvas and dry-run them.

use flow_canvas::{config::EditorConfig, frontend::FlowCanvasApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,flow_canvas=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Flow Canvas");

    let config = EditorConfig::load_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Flow Canvas"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Flow Canvas",
        native_options,
        Box::new(move |cc| {
            if config.ui.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }
            Ok(Box::new(FlowCanvasApp::new(cc, config)))
        }),
    );

    tracing::info!("Shutting down...");
    result
}
