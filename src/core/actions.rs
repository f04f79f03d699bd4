// LogLens - core/actions.rs
//
// Mode-driven UI dispatch: a pure function from (QueryMode, UiEvent)
// to UiAction. The panels emit events; the state applies actions.
// Keeping this a data-in data-out function makes the mode-dependent
// behaviour testable without a UI.

use crate::core::model::QueryMode;

/// A discrete user interaction the panels can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A result row was clicked (index into the current result set).
    RowClicked(usize),

    /// The query text changed (any edit keystroke).
    QueryEdited,

    /// A run was submitted (button or chord).
    RunStarted,
}

/// The state change an event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Select the row, opening the detail panel.
    SelectRow(usize),

    /// Clear the selection, closing the detail panel.
    CloseDetail,

    /// No state change.
    None,
}

/// Map an event to its action under the given query mode.
///
/// Invariants encoded here:
/// - Row clicks open the detail panel only in Structured mode; in
///   RawSql mode they are a no-op for panel purposes.
/// - Editing the query closes the panel.
/// - Starting a run closes the panel before any results arrive.
pub fn dispatch(mode: QueryMode, event: UiEvent) -> UiAction {
    match event {
        UiEvent::RowClicked(index) => {
            if mode.supports_drilldown() {
                UiAction::SelectRow(index)
            } else {
                UiAction::None
            }
        }
        UiEvent::QueryEdited | UiEvent::RunStarted => UiAction::CloseDetail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_click_opens_detail_in_structured_mode() {
        assert_eq!(
            dispatch(QueryMode::Structured, UiEvent::RowClicked(3)),
            UiAction::SelectRow(3)
        );
    }

    #[test]
    fn test_row_click_is_noop_in_raw_mode() {
        assert_eq!(
            dispatch(QueryMode::RawSql, UiEvent::RowClicked(3)),
            UiAction::None
        );
    }

    #[test]
    fn test_editing_closes_detail_in_both_modes() {
        for mode in QueryMode::all() {
            assert_eq!(dispatch(*mode, UiEvent::QueryEdited), UiAction::CloseDetail);
        }
    }

    #[test]
    fn test_run_closes_detail_in_both_modes() {
        for mode in QueryMode::all() {
            assert_eq!(dispatch(*mode, UiEvent::RunStarted), UiAction::CloseDetail);
        }
    }
}
