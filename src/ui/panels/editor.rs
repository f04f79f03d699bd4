// LogLens - ui/panels/editor.rs
//
// Query editor surface: a multiline code editor with an explicit Run
// button and a Ctrl+Enter chord while focused. Both trigger paths call
// `begin_run`, so they are indistinguishable downstream.

use crate::app::state::{ExplorerState, ExportFormat};
use crate::core::actions::UiEvent;
use crate::core::model::RunTrigger;
use crate::ui::theme;

/// Render the editor pane.
pub fn render(ui: &mut egui::Ui, state: &mut ExplorerState) {
    let editor_response = ui.add_sized(
        [ui.available_width(), theme::EDITOR_HEIGHT],
        egui::TextEdit::multiline(&mut state.query.text)
            .code_editor()
            .hint_text("Type a query, then Run (Ctrl+Enter)"),
    );

    if editor_response.changed() {
        state.handle(UiEvent::QueryEdited);
    }

    // Ctrl+Enter while the editor has focus follows the same run path
    // as the button.
    if editor_response.has_focus() {
        let chord = ui.input_mut(|i| i.consume_key(egui::Modifiers::CTRL, egui::Key::Enter));
        if chord {
            state.begin_run(RunTrigger::Chord);
        }
    }

    ui.horizontal(|ui| {
        let run_button = ui
            .add_enabled(!state.run_in_flight, egui::Button::new("Run"))
            .on_hover_text("run-logs-query");
        if run_button.clicked() {
            state.begin_run(RunTrigger::Button);
        }

        if ui.button("Save query").clicked() {
            state.show_save_dialog = true;
        }

        ui.separator();

        let has_results = state
            .results
            .as_ref()
            .map(|r| !r.rows.is_empty())
            .unwrap_or(false);
        ui.add_enabled_ui(has_results, |ui| {
            if ui.button("Export CSV...").clicked() {
                state.request_export = Some(ExportFormat::Csv);
            }
            if ui.button("Export JSON...").clicked() {
                state.request_export = Some(ExportFormat::Json);
            }
        });

        if state.run_in_flight {
            ui.spinner();
        }
    });
}
