// LogLens - ui/panels/saved.rs
//
// Saved-query window and the save-name dialog.

use crate::app::state::ExplorerState;
use crate::core::actions::UiEvent;
use chrono::Utc;

/// Render the saved-queries window (if state.show_saved_queries).
pub fn render(ctx: &egui::Context, state: &mut ExplorerState) {
    render_list(ctx, state);
    render_save_dialog(ctx, state);
}

fn render_list(ctx: &egui::Context, state: &mut ExplorerState) {
    if !state.show_saved_queries {
        return;
    }

    let mut open = true;
    let mut load: Option<usize> = None;
    let mut delete: Option<usize> = None;

    egui::Window::new("Saved queries")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(360.0)
        .show(ctx, |ui| {
            if state.saved.queries.is_empty() {
                ui.label("No saved queries yet. Use \"Save query\" in the editor.");
            } else {
                egui::ScrollArea::vertical()
                    .id_salt("saved_query_list")
                    .max_height(280.0)
                    .show(ui, |ui| {
                        for (index, query) in state.saved.queries.iter().enumerate() {
                            ui.horizontal(|ui| {
                                ui.strong(&query.name);
                                ui.label(
                                    egui::RichText::new(query.source.label()).size(11.0),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("Delete").clicked() {
                                            delete = Some(index);
                                        }
                                        if ui.small_button("Load").clicked() {
                                            load = Some(index);
                                        }
                                    },
                                );
                            });
                        }
                    });
            }
        });

    if let Some(index) = load {
        if let Some(query) = state.saved.queries.get(index).cloned() {
            state.query.text = query.text;
            state.source = query.source;
            state.handle(UiEvent::QueryEdited);
            state.status_message = format!("Loaded saved query '{}'.", query.name);
        }
    }
    if let Some(index) = delete {
        if let Err(e) = state.saved.remove(index) {
            tracing::warn!(error = %e, "Could not delete saved query");
            state.status_message = format!("Delete failed: {e}");
        }
    }

    if !open {
        state.show_saved_queries = false;
    }
}

fn render_save_dialog(ctx: &egui::Context, state: &mut ExplorerState) {
    if !state.show_save_dialog {
        return;
    }

    let mut close = false;

    egui::Window::new("Save query")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Name:");
            ui.text_edit_singleline(&mut state.save_name_input);
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    let name = state.save_name_input.clone();
                    let text = state.query.text.clone();
                    match state.saved.add(&name, &text, state.source, Utc::now()) {
                        Ok(()) => {
                            state.status_message = format!("Saved query '{}'.", name.trim());
                            state.save_name_input.clear();
                            close = true;
                        }
                        Err(e) => {
                            state.status_message = format!("Save failed: {e}");
                        }
                    }
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

    if close {
        state.show_save_dialog = false;
    }
}
