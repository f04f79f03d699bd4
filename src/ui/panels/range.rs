// LogLens - ui/panels/range.rs
//
// Controls bar: source selector, mode selector, range inputs, and the
// quick-range dropdown. Range changes run through `set_range`, which
// applies the retention guard.

use crate::app::state::ExplorerState;
use crate::core::model::{LogSource, QueryMode, QuickRange};
use chrono::Utc;

/// Render the controls bar (top strip).
pub fn render(ui: &mut egui::Ui, state: &mut ExplorerState) {
    ui.horizontal(|ui| {
        // Source selector
        egui::ComboBox::from_id_salt("source_select")
            .selected_text(state.source.label())
            .show_ui(ui, |ui| {
                for source in LogSource::all() {
                    ui.selectable_value(&mut state.source, *source, source.label());
                }
            });

        ui.separator();

        // Mode tabs
        for mode in QueryMode::all() {
            if ui.selectable_label(state.mode == *mode, mode.label()).clicked() {
                state.set_mode(*mode);
            }
        }

        ui.separator();

        // Quick-range dropdown
        egui::ComboBox::from_id_salt("quick_range")
            .selected_text("Quick range")
            .show_ui(ui, |ui| {
                for pick in QuickRange::all() {
                    if ui.button(pick.label()).clicked() {
                        state.apply_quick_range(*pick, Utc::now());
                    }
                }
            });

        ui.separator();

        ui.toggle_value(&mut state.show_field_reference, "Field Reference");
        ui.toggle_value(&mut state.show_saved_queries, "Saved queries");
    });

    // Manual range inputs, applied on demand so half-typed instants do
    // not thrash the guard.
    ui.horizontal(|ui| {
        ui.label("From:");
        ui.add(
            egui::TextEdit::singleline(&mut state.range_start_input)
                .desired_width(200.0)
                .font(egui::TextStyle::Monospace),
        );
        ui.label("To:");
        ui.add(
            egui::TextEdit::singleline(&mut state.range_end_input)
                .desired_width(200.0)
                .font(egui::TextStyle::Monospace),
        );
        if ui.button("Apply").clicked() {
            state.apply_range_inputs();
        }
    });
}
