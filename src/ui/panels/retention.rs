// LogLens - ui/panels/retention.rs
//
// "Log retention" upsell dialog. Shown whenever the retention guard
// has blocked the requested range; normal rendering resumes only after
// the user dismisses it (which clamps the range to the allowance).
// Plan changes themselves belong to the billing layer, not this app.

use crate::app::state::ExplorerState;
use crate::ui::theme;

/// Render the retention dialog (if a block is active).
pub fn render(ctx: &egui::Context, state: &mut ExplorerState) {
    let Some(block) = state.retention_prompt.clone() else {
        return;
    };

    let mut dismissed = false;

    egui::Window::new("Log retention")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "The {} plan keeps logs for {} day(s).",
                    block.tier, block.allowance_days
                ))
                .strong(),
            );
            ui.label(format!(
                "The requested range spans {} day(s), which is beyond this plan's retention.",
                block.requested_days
            ));
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Upgrade the project's plan to query longer ranges.")
                    .color(theme::UPSELL_ACCENT),
            );

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Use allowed range").clicked() {
                    dismissed = true;
                }
                if ui.button("See upgrade options").clicked() {
                    // Billing is out of scope; point at the plan page.
                    state.status_message =
                        "Plan management lives in the project dashboard.".to_string();
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.dismiss_retention_prompt();
    }
}
