use clap::Parser;
use eframe::egui;
use std::sync::mpsc;

use design_doc_viewer::storage::load_mapping;
use design_doc_viewer::watcher::{self, DirectoryWatcher};
use design_doc_viewer::{Cli, Config, DesignDocApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    // Without a mapping table there is nothing to match against.
    let mapping = load_mapping(&config.mapping_path)?;

    let (event_tx, event_rx) = mpsc::channel();
    let directory_watcher = DirectoryWatcher::new(&config.watched_dir, config.poll_interval());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Design Document Viewer")
            .with_resizable(true)
            .with_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Design Document Viewer",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            watcher::spawn(directory_watcher, event_tx, move || ctx.request_repaint())?;
            Ok(Box::new(DesignDocApp::new(config, mapping, event_rx)))
        }),
    )?;

    Ok(())
}
