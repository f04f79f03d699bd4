// LogLens - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the panels and manages the run lifecycle: polls the
// query manager per frame (budgeted), consumes the pending-action
// flags set by the panels, and lays out the explorer.

use crate::app::query::QueryManager;
use crate::app::state::{ExplorerState, ExportFormat};
use crate::backend::QueryBackend;
use crate::core::export;
use crate::core::model::QueryProgress;
use crate::ui;
use crate::util::constants;
use std::sync::Arc;

/// The LogLens application.
pub struct ExplorerApp {
    pub state: ExplorerState,
    pub manager: QueryManager,
    backend: Arc<dyn QueryBackend>,
}

impl ExplorerApp {
    /// Create a new application instance with the given state and
    /// execution backend.
    pub fn new(state: ExplorerState, backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            state,
            manager: QueryManager::new(),
            backend,
        }
    }

    /// Consume a pending export request: pick a destination, write the
    /// current result set.
    fn handle_export(&mut self) {
        let Some(format) = self.state.request_export.take() else {
            return;
        };
        let Some(results) = self.state.results.clone() else {
            return;
        };

        let (extension, default_name) = match format {
            ExportFormat::Csv => ("csv", "results.csv"),
            ExportFormat::Json => ("json", "results.json"),
        };

        let Some(dest) = rfd::FileDialog::new()
            .add_filter(extension.to_uppercase(), &[extension])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        match std::fs::File::create(&dest) {
            Ok(file) => {
                let written = match format {
                    ExportFormat::Csv => export::export_csv(&results, file, &dest),
                    ExportFormat::Json => export::export_json(&results, file, &dest),
                };
                match written {
                    Ok(n) => {
                        self.state.status_message =
                            format!("Exported {n} row(s) to '{}'.", dest.display());
                    }
                    Err(e) => {
                        self.state.status_message = format!("Export failed: {e}");
                    }
                }
            }
            Err(e) => {
                self.state.status_message = format!("Cannot create file: {e}");
            }
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll run progress. The manager has already dropped messages
        // from superseded runs.
        let messages = self
            .manager
            .poll_progress(constants::MAX_QUERY_MESSAGES_PER_FRAME);
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                QueryProgress::Started { run_id } => {
                    tracing::debug!(run_id, "Run executing");
                }
                QueryProgress::Completed { reply, .. } => {
                    self.state.apply_reply(reply);
                }
                QueryProgress::Failed { error, .. } => {
                    self.state.apply_failure(&error);
                }
            }
        }
        // Repaint while a run is active so the result arrives promptly.
        if had_messages || self.state.run_in_flight {
            ctx.request_repaint();
        }

        // ---- Pending actions set by the panels ----
        if let Some(request) = self.state.take_run_request() {
            self.manager.start_run(request, Arc::clone(&self.backend));
        }
        if let Some(request) = self.state.take_load_older_request() {
            self.manager.start_run(request, Arc::clone(&self.backend));
        }
        self.handle_export();

        // ---- Layout ----
        egui::TopBottomPanel::top("controls_bar").show(ctx, |ui| {
            ui::panels::range::render(ui, &mut self.state);
        });

        egui::TopBottomPanel::top("editor_pane")
            .resizable(true)
            .show(ctx, |ui| {
                ui::panels::editor::render(ui, &mut self.state);
            });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.state.warnings.is_empty() {
                        let count = self.state.warnings.len();
                        let label = if count == 1 {
                            "1 warning".to_string()
                        } else {
                            format!("{count} warnings")
                        };
                        ui.label(
                            egui::RichText::new(label).color(ui::theme::WARNING_TEXT),
                        )
                        .on_hover_text(self.state.warnings.join("\n"));
                    }
                    if let Some(ref results) = self.state.results {
                        ui.label(format!("{} row(s)", results.rows.len()));
                    }
                });
            });
        });

        // Detail panel (right), visible only when a row is selected in
        // a mode that permits drill-down.
        if self.state.detail_visible() {
            egui::SidePanel::right("detail_pane")
                .default_width(ui::theme::DETAIL_PANE_WIDTH)
                .resizable(true)
                .show(ctx, |ui| {
                    ui::panels::detail::render(ui, &self.state);
                });
        }

        // Central panel (results)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::results::render(ui, &mut self.state);
        });

        // Windows
        ui::panels::fields::render(ctx, &mut self.state);
        ui::panels::saved::render(ctx, &mut self.state);
        ui::panels::retention::render(ctx, &mut self.state);
    }
}
