// LogLens - app/state.rs
//
// Application state management. Holds the query state, active range,
// results, selection, and the dialog/window flags.
// Owned by the eframe::App implementation.
//
// Initialisation from launch parameters is an explicit function
// (`from_params`), so the parameter-to-state mapping is testable
// without a UI or a process-global router.

use crate::app::saved::SavedQueryStore;
use crate::core::actions::{self, UiAction, UiEvent};
use crate::core::model::{
    LogSource, QueryMode, QueryReply, QueryRequest, QueryState, QuickRange, ResultRow, ResultSet,
    RunTrigger, TimeRange,
};
use crate::core::params::NavParams;
use crate::core::retention::{self, RetentionBlock, RetentionPolicy};
use crate::util::constants;
use chrono::{DateTime, Utc};

/// Export formats offered for the current result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Top-level application state.
#[derive(Debug)]
pub struct ExplorerState {
    /// Active log source.
    pub source: LogSource,

    /// Active query mode.
    pub mode: QueryMode,

    /// Editor text and last-run marker.
    pub query: QueryState,

    /// Queried time range.
    pub range: TimeRange,

    /// Rows requested per run.
    pub row_limit: usize,

    /// Retention policy for the active plan tier (external input).
    pub policy: RetentionPolicy,

    /// Results of the most recent completed run.
    pub results: Option<ResultSet>,

    /// Index of the currently selected row in `results`.
    pub selected_index: Option<usize>,

    /// Whether a run is currently executing.
    pub run_in_flight: bool,

    /// True while the in-flight run is a "Load older" page (its reply
    /// appends to `results` instead of replacing them).
    pub run_is_page: bool,

    /// Non-fatal warnings accumulated for display.
    pub warnings: Vec<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// When set, the "Log retention" dialog blocks normal rendering.
    pub retention_prompt: Option<RetentionBlock>,

    /// Whether the Field Reference window is open.
    pub show_field_reference: bool,

    /// Whether the saved-queries window is open.
    pub show_saved_queries: bool,

    /// Whether the save-query naming dialog is open.
    pub show_save_dialog: bool,

    /// Name buffer for the save-query dialog.
    pub save_name_input: String,

    /// Editable text buffers for the range inputs (applied on demand).
    pub range_start_input: String,
    pub range_end_input: String,

    /// Saved-query store.
    pub saved: SavedQueryStore,

    // ---- Pending actions, consumed by the frame loop ----
    /// A run was requested (button or chord).
    pub request_run: Option<RunTrigger>,

    /// A "Load older" page was requested.
    pub request_load_older: bool,

    /// An export was requested.
    pub request_export: Option<ExportFormat>,
}

impl ExplorerState {
    /// Create initial state from launch parameters.
    ///
    /// `now` is passed in so the default range (and tests) do not read
    /// the wall clock implicitly.
    pub fn from_params(
        params: &NavParams,
        policy: RetentionPolicy,
        row_limit: usize,
        saved: SavedQueryStore,
        now: DateTime<Utc>,
    ) -> Self {
        let range = match params.range() {
            Some((start, end)) => TimeRange { start, end },
            None => TimeRange {
                start: now - chrono::Duration::hours(constants::DEFAULT_RANGE_HOURS),
                end: now,
            },
        };

        let mut state = Self {
            source: params.source.unwrap_or_default(),
            mode: QueryMode::default(),
            query: QueryState {
                text: params.query.clone().unwrap_or_default(),
                last_run_text: None,
            },
            range,
            row_limit,
            policy,
            results: None,
            selected_index: None,
            run_in_flight: false,
            run_is_page: false,
            warnings: Vec::new(),
            status_message: "Ready. Run a query to load results.".to_string(),
            retention_prompt: None,
            show_field_reference: false,
            show_saved_queries: false,
            show_save_dialog: false,
            save_name_input: String::new(),
            range_start_input: String::new(),
            range_end_input: String::new(),
            saved,
            request_run: None,
            request_load_older: false,
            request_export: None,
        };
        state.sync_range_inputs();

        // A deep-linked range can already exceed the allowance.
        state.retention_prompt = retention::check_range(&state.range, &state.policy);

        state
    }

    // -------------------------------------------------------------------------
    // Events and derived state
    // -------------------------------------------------------------------------

    /// Apply a UI event through the pure mode dispatch.
    pub fn handle(&mut self, event: UiEvent) {
        match actions::dispatch(self.mode, event) {
            UiAction::SelectRow(index) => {
                let row_count = self.results.as_ref().map(|r| r.rows.len()).unwrap_or(0);
                if index >= row_count {
                    return;
                }
                // Clicking the selected row again deselects it.
                if self.selected_index == Some(index) {
                    self.selected_index = None;
                } else {
                    self.selected_index = Some(index);
                }
            }
            UiAction::CloseDetail => self.selected_index = None,
            UiAction::None => {}
        }
    }

    /// The detail panel is visible iff a row is selected AND the mode
    /// permits row-level inspection.
    pub fn detail_visible(&self) -> bool {
        self.selected_index.is_some() && self.mode.supports_drilldown()
    }

    /// The currently selected row, if any.
    pub fn selected_row(&self) -> Option<&ResultRow> {
        let results = self.results.as_ref()?;
        self.selected_index.and_then(|idx| results.rows.get(idx))
    }

    /// Switch mode. Leaving Structured mode closes the detail panel.
    pub fn set_mode(&mut self, mode: QueryMode) {
        self.mode = mode;
        if !mode.supports_drilldown() {
            self.selected_index = None;
        }
    }

    // -------------------------------------------------------------------------
    // Range handling
    // -------------------------------------------------------------------------

    /// Set the queried range, running the retention guard.
    pub fn set_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.range = TimeRange { start, end };
        self.sync_range_inputs();
        self.retention_prompt = retention::check_range(&self.range, &self.policy);
    }

    /// Apply a quick-pick option ending at `now`.
    pub fn apply_quick_range(&mut self, pick: QuickRange, now: DateTime<Utc>) {
        let range = pick.range_ending_at(now);
        self.set_range(range.start, range.end);
    }

    /// Parse and apply the range text inputs. Unparseable input leaves
    /// the range unchanged and reports via the status line.
    pub fn apply_range_inputs(&mut self) {
        let start = DateTime::parse_from_rfc3339(self.range_start_input.trim());
        let end = DateTime::parse_from_rfc3339(self.range_end_input.trim());
        match (start, end) {
            (Ok(start), Ok(end)) => {
                self.set_range(start.with_timezone(&Utc), end.with_timezone(&Utc));
                self.status_message = "Range updated.".to_string();
            }
            _ => {
                self.status_message =
                    "Range not updated: enter RFC 3339 instants (e.g. 2026-08-06T10:00:00Z)."
                        .to_string();
                self.sync_range_inputs();
            }
        }
    }

    /// Dismiss the retention dialog, clamping the range start to the
    /// active tier's allowance.
    pub fn dismiss_retention_prompt(&mut self) {
        if self.retention_prompt.take().is_some() {
            let allowance = chrono::Duration::days(self.policy.active_allowance_days());
            self.range.start = self.range.end - allowance;
            self.sync_range_inputs();
            self.status_message = format!(
                "Range clamped to the {} plan's {}-day allowance.",
                self.policy.tier,
                self.policy.active_allowance_days()
            );
        }
    }

    fn sync_range_inputs(&mut self) {
        self.range_start_input = self.range.start.to_rfc3339();
        self.range_end_input = self.range.end.to_rfc3339();
    }

    // -------------------------------------------------------------------------
    // Run lifecycle
    // -------------------------------------------------------------------------

    /// Record a run request. Both trigger paths (button, chord) land
    /// here; the frame loop consumes the flag.
    pub fn begin_run(&mut self, trigger: RunTrigger) {
        self.request_run = Some(trigger);
    }

    /// Consume a pending run request and build the backend request.
    ///
    /// Returns `None` when no run is pending, the query text is over
    /// the length limit, or the retention guard blocks the range (the
    /// prompt is raised instead of results).
    pub fn take_run_request(&mut self) -> Option<QueryRequest> {
        let trigger = self.request_run.take()?;

        if self.query.text.chars().count() > constants::MAX_QUERY_LENGTH {
            self.status_message = format!(
                "Query not run: text exceeds {} characters.",
                constants::MAX_QUERY_LENGTH
            );
            return None;
        }

        if let Some(block) = retention::check_range(&self.range, &self.policy) {
            self.retention_prompt = Some(block);
            return None;
        }

        tracing::debug!(trigger = ?trigger, source = %self.source, "Run requested");

        // The panel closes before any new run completes.
        self.handle(UiEvent::RunStarted);
        self.query.last_run_text = Some(self.query.text.clone());
        self.run_in_flight = true;
        self.run_is_page = false;
        self.status_message = "Running query...".to_string();

        Some(QueryRequest {
            source: self.source,
            mode: self.mode,
            text: self.query.text.clone(),
            range: self.range,
            limit: self.row_limit,
            before: None,
        })
    }

    /// Consume a pending "Load older" request. Available in Structured
    /// mode only, once a first page is loaded, up to the row cap.
    pub fn take_load_older_request(&mut self) -> Option<QueryRequest> {
        if !std::mem::take(&mut self.request_load_older) {
            return None;
        }
        if !self.mode.supports_paging() || self.run_in_flight {
            return None;
        }
        let results = self.results.as_ref()?;
        if results.rows.len() >= constants::MAX_RESULT_ROWS {
            self.status_message = format!(
                "Row cap reached ({}). Narrow the range to see older rows.",
                constants::MAX_RESULT_ROWS
            );
            return None;
        }
        let before = results.oldest_timestamp()?;

        self.run_in_flight = true;
        self.run_is_page = true;
        self.status_message = "Loading older rows...".to_string();

        Some(QueryRequest {
            source: self.source,
            mode: self.mode,
            text: self.query.last_run_text.clone().unwrap_or_default(),
            range: self.range,
            limit: self.row_limit,
            before: Some(before),
        })
    }

    /// Apply a completed reply: replace the result set, or append when
    /// the run was a page.
    pub fn apply_reply(&mut self, reply: QueryReply) {
        let page = std::mem::take(&mut self.run_is_page);
        self.run_in_flight = false;

        let added = reply.rows.len();
        if page {
            if let Some(ref mut results) = self.results {
                results.extend_page(reply.rows);
            } else {
                self.results = Some(ResultSet::from_rows(reply.rows));
            }
        } else {
            self.results = Some(ResultSet::from_rows(reply.rows));
            self.selected_index = None;
        }

        self.push_warnings(reply.warnings);

        let total = self.results.as_ref().map(|r| r.rows.len()).unwrap_or(0);
        self.status_message = if page {
            format!("Loaded {added} older row(s); {total} total.")
        } else {
            format!(
                "{total} row(s) from {} file(s) in {:.2}s.",
                reply.scanned_files,
                reply.elapsed.as_secs_f64()
            )
        };
    }

    /// Apply a failed run: surface the error, keep the editor contents
    /// and any previous results.
    pub fn apply_failure(&mut self, error: &str) {
        self.run_in_flight = false;
        self.run_is_page = false;
        self.status_message = format!("Query failed: {error}");
    }

    /// Append warnings, keeping the collection bounded.
    pub fn push_warnings(&mut self, warnings: Vec<String>) {
        for warning in warnings {
            if self.warnings.len() >= constants::MAX_WARNINGS {
                break;
            }
            self.warnings.push(warning);
        }
    }
}
