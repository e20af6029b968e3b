use chrono::{DateTime, Local};
use eframe::egui;
use std::sync::mpsc;

use crate::config::Config;
use crate::storage::{find_matches, read_design_doc, MappingTable};
use crate::ui::{DocumentWindows, MatchListState};
use crate::watcher::WatchEvent;

/// Outcome of the most recent match cycle, shown in the status line.
pub struct LastScan {
    pub snippet: String,
    pub matches: usize,
    pub at: DateTime<Local>,
}

/// Owns all UI state. Watcher events arrive over a channel and are
/// processed on the UI thread, so nothing else touches this state.
pub struct DesignDocApp {
    config: Config,
    mapping: MappingTable,
    events: mpsc::Receiver<WatchEvent>,

    match_list: MatchListState,
    documents: DocumentWindows,
    error_message: Option<String>,
    last_scan: Option<LastScan>,
}

impl DesignDocApp {
    pub fn new(config: Config, mapping: MappingTable, events: mpsc::Receiver<WatchEvent>) -> Self {
        Self {
            config,
            mapping,
            events,
            match_list: MatchListState::new(),
            documents: DocumentWindows::new(),
            error_message: None,
            last_scan: None,
        }
    }

    pub fn match_list(&self) -> &MatchListState {
        &self.match_list
    }

    pub fn documents(&self) -> &DocumentWindows {
        &self.documents
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn last_scan(&self) -> Option<&LastScan> {
        self.last_scan.as_ref()
    }

    /// Runs a match cycle for every pending watcher event. The last
    /// snippet processed decides what the list shows.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                WatchEvent::NewFile(name) => self.handle_new_file(name),
            }
        }
    }

    fn handle_new_file(&mut self, name: String) {
        let docs = find_matches(
            &name,
            &self.config.watched_dir,
            &self.mapping,
            &self.config.source_asset_dir,
        );
        log::info!("Snippet {} matched {} design document(s)", name, docs.len());

        self.last_scan = Some(LastScan {
            snippet: name,
            matches: docs.len(),
            at: Local::now(),
        });
        self.match_list.update_list(docs);
    }

    pub fn open_document(&mut self, name: &str) {
        match read_design_doc(&self.config.design_doc_dir, name) {
            Ok(content) => {
                self.documents.open(name, content);
            }
            Err(e) => {
                log::error!("Failed to open design document {}: {}", name, e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.last_scan {
                Some(scan) => {
                    ui.label(format!(
                        "{}  {} ({} match{})",
                        format_timestamp(scan.at),
                        scan.snippet,
                        scan.matches,
                        if scan.matches == 1 { "" } else { "es" }
                    ));
                }
                None => {
                    ui.label(format!("Watching {}", self.config.watched_dir.display()));
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("{} mapping entries", self.mapping.len()));
            });
        });
    }

    fn show_error(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error_message else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.error_message = None;
        }
    }
}

impl eframe::App for DesignDocApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.show_status(ui);
        });

        let keyboard_focus = self.error_message.is_none() && ctx.memory(|m| m.focused().is_none());
        let mut to_open = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            to_open = self.match_list.show(ui, keyboard_focus);
        });
        if let Some(name) = to_open {
            self.open_document(&name);
        }

        self.documents.show(ctx);
        self.show_error(ctx);

        // The watcher wakes the UI on new files; this is only a backstop.
        ctx.request_repaint_after(self.config.poll_interval());
    }
}

fn format_timestamp(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}
