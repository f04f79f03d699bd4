// LogLens - ui/panels/detail.rs
//
// Row detail panel (right side). Shows the selected row's top-level
// fields in a grid and the full row pretty-printed, with a Copy action
// that places the JSON on the clipboard.

use crate::app::state::ExplorerState;
use crate::core::export::cell_text;
use crate::util::constants;

/// Render the detail panel. The caller only shows this panel when
/// `state.detail_visible()` holds.
pub fn render(ui: &mut egui::Ui, state: &ExplorerState) {
    let Some(row) = state.selected_row() else {
        ui.centered_and_justified(|ui| {
            ui.label("Select a row to view details.");
        });
        return;
    };

    let pretty = serde_json::to_string_pretty(row).unwrap_or_else(|_| row.to_string());

    ui.horizontal(|ui| {
        ui.heading("Row detail");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Copy").clicked() {
                ui.ctx().copy_text(pretty.clone());
            }
        });
    });
    ui.separator();

    if let Some(map) = row.as_object() {
        egui::Grid::new("detail_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for key in map.keys() {
                    ui.label(format!("{key}:"));
                    ui.label(
                        egui::RichText::new(truncate_value(&cell_text(row, key)))
                            .monospace()
                            .size(11.5),
                    );
                    ui.end_row();
                }
            });
        ui.separator();
    }

    egui::ScrollArea::vertical()
        .id_salt("detail_json")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.label(egui::RichText::new(pretty).monospace().size(11.5));
        });
}

fn truncate_value(text: &str) -> String {
    if text.chars().count() <= constants::MAX_CELL_CHARS {
        return text.to_string();
    }
    let mut out: String = text
        .chars()
        .take(constants::MAX_CELL_CHARS - 1)
        .collect();
    out.push('\u{2026}');
    out
}
