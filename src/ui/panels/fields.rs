// LogLens - ui/panels/fields.rs
//
// Field Reference window: the queryable field paths for the active
// source. Clicking a path appends it to the editor.

use crate::app::state::ExplorerState;
use crate::core::actions::UiEvent;
use crate::core::fields;
use crate::ui::theme;

/// Render the Field Reference window (if state.show_field_reference).
pub fn render(ctx: &egui::Context, state: &mut ExplorerState) {
    if !state.show_field_reference {
        return;
    }

    let mut open = true;
    let mut insert: Option<&'static str> = None;

    egui::Window::new("Field Reference")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(theme::FIELD_REFERENCE_WIDTH)
        .show(ctx, |ui| {
            ui.label(format!("Queryable fields for {}:", state.source.label()));
            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .id_salt("field_reference_list")
                .max_height(320.0)
                .show(ui, |ui| {
                    egui::Grid::new("field_reference_grid")
                        .num_columns(2)
                        .striped(true)
                        .spacing([12.0, 3.0])
                        .show(ui, |ui| {
                            for field in fields::fields_for(state.source) {
                                let link = ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(field.path).monospace().size(12.0),
                                    )
                                    .sense(egui::Sense::click()),
                                );
                                if link.clicked() {
                                    insert = Some(field.path);
                                }
                                ui.label(field.description);
                                ui.end_row();
                            }
                        });
                });
        });

    if let Some(path) = insert {
        if !state.query.text.is_empty() && !state.query.text.ends_with(char::is_whitespace) {
            state.query.text.push(' ');
        }
        state.query.text.push_str(path);
        state.handle(UiEvent::QueryEdited);
    }

    if !open {
        state.show_field_reference = false;
    }
}
