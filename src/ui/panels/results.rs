// LogLens - ui/panels/results.rs
//
// Result table (central area). Columns come from the result set's
// derived schema; rows are virtual-scrolled via `show_rows` so
// rendering cost stays flat regardless of row count.
//
// Row clicks go through the pure mode dispatch: they select (and open
// the detail panel) in Filtered mode and are a no-op in Custom SQL
// mode. "Load older" appears in Filtered mode only.

use crate::app::state::ExplorerState;
use crate::core::actions::UiEvent;
use crate::core::export::cell_text;
use crate::core::model::ResultSet;
use crate::ui::theme;
use crate::util::constants;

/// How many leading rows participate in column-width measurement.
const WIDTH_SAMPLE_ROWS: usize = 50;

/// Per-column character width bounds.
const MIN_COL_CHARS: usize = 8;
const MAX_COL_CHARS: usize = 48;

/// Render the results panel.
pub fn render(ui: &mut egui::Ui, state: &mut ExplorerState) {
    let Some(results) = state.results.as_ref() else {
        ui.centered_and_justified(|ui| {
            ui.label("No results yet.\nType a query and press Run (or Ctrl+Enter).");
        });
        return;
    };

    if results.rows.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("The query matched no rows in the selected range.");
        });
        return;
    }

    let widths = column_widths(results);

    // Header row
    let header = results
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<width$}", truncate(col, *w), width = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    ui.monospace(egui::RichText::new(header).strong());
    ui.separator();

    // Row clicks are collected and applied after show_rows so the
    // immutable borrow of `results` has ended.
    let mut clicked_row: Option<usize> = None;
    let row_count = results.rows.len();

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, row_count, |ui, row_range| {
            for index in row_range {
                let Some(row) = results.rows.get(index) else {
                    continue;
                };
                let is_selected = state.selected_index == Some(index);

                let line = results
                    .columns
                    .iter()
                    .zip(&widths)
                    .map(|(col, w)| {
                        format!("{:<width$}", truncate(&cell_text(row, col), *w), width = *w)
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");

                let mut text = egui::RichText::new(line).monospace();
                if let Some(colour) = row_level(row).and_then(|l| theme::level_colour(&l)) {
                    text = text.color(colour);
                }

                if ui.add(egui::SelectableLabel::new(is_selected, text)).clicked() {
                    clicked_row = Some(index);
                }
            }
        });

    if let Some(index) = clicked_row {
        state.handle(UiEvent::RowClicked(index));
    }

    // Chronological paging is a Filtered-mode feature.
    if state.mode.supports_paging() {
        ui.separator();
        ui.horizontal(|ui| {
            let can_page = !state.run_in_flight && row_count < constants::MAX_RESULT_ROWS;
            if ui.add_enabled(can_page, egui::Button::new("Load older")).clicked() {
                state.request_load_older = true;
            }
            ui.label(format!("{row_count} row(s) loaded"));
        });
    }
}

/// Character width per column: the widest of the header and the first
/// `WIDTH_SAMPLE_ROWS` cells, clamped to the global bounds.
fn column_widths(results: &ResultSet) -> Vec<usize> {
    results
        .columns
        .iter()
        .map(|col| {
            let cells = results
                .rows
                .iter()
                .take(WIDTH_SAMPLE_ROWS)
                .map(|row| cell_text(row, col).chars().count())
                .max()
                .unwrap_or(0);
            cells.max(col.chars().count()).clamp(MIN_COL_CHARS, MAX_COL_CHARS)
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

/// A row's level string, when it carries one at the top level or under
/// `metadata.level`.
fn row_level(row: &serde_json::Value) -> Option<String> {
    row.get("level")
        .or_else(|| row.get("metadata").and_then(|m| m.get("level")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_widths_are_bounded() {
        let results = ResultSet::from_rows(vec![json!({
            "timestamp": "2026-08-01T10:00:00Z",
            "x": "y",
            "long": "a".repeat(500),
        })]);
        for (col, width) in results.columns.iter().zip(column_widths(&results)) {
            assert!(width >= MIN_COL_CHARS, "{col} too narrow");
            assert!(width <= MAX_COL_CHARS, "{col} too wide");
        }
    }

    #[test]
    fn test_truncate_marks_elision() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("abcdefghij", 5);
        assert_eq!(cut.chars().count(), 5);
        assert!(cut.ends_with('\u{2026}'));
    }

    #[test]
    fn test_row_level_reads_nested_metadata() {
        let row = json!({"metadata": {"level": "error"}});
        assert_eq!(row_level(&row).as_deref(), Some("error"));
        assert_eq!(row_level(&json!({"level": "warn"})).as_deref(), Some("warn"));
        assert!(row_level(&json!({"event_message": "x"})).is_none());
    }
}
