// LogLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Log source
// =============================================================================

/// A queryable log source, selected in the UI or via the `type` launch
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    /// Edge/API request logs.
    #[default]
    Api,
    /// Database logs.
    Database,
    /// Serverless function logs.
    Functions,
    /// Authentication logs.
    Auth,
    /// Object storage logs.
    Storage,
    /// Realtime channel logs.
    Realtime,
}

impl LogSource {
    /// Returns all variants in display order.
    pub fn all() -> &'static [LogSource] {
        &[
            LogSource::Api,
            LogSource::Database,
            LogSource::Functions,
            LogSource::Auth,
            LogSource::Storage,
            LogSource::Realtime,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LogSource::Api => "API",
            LogSource::Database => "Database",
            LogSource::Functions => "Functions",
            LogSource::Auth => "Auth",
            LogSource::Storage => "Storage",
            LogSource::Realtime => "Realtime",
        }
    }

    /// The `type` parameter value naming this source.
    pub fn param_value(&self) -> &'static str {
        match self {
            LogSource::Api => "api",
            LogSource::Database => "database",
            LogSource::Functions => "functions",
            LogSource::Auth => "auth",
            LogSource::Storage => "storage",
            LogSource::Realtime => "realtime",
        }
    }

    /// Parse a `type` parameter value. Matching is case-insensitive.
    pub fn from_param(value: &str) -> Option<LogSource> {
        let lower = value.to_lowercase();
        LogSource::all()
            .iter()
            .copied()
            .find(|s| s.param_value() == lower)
    }

    /// Subdirectory name under the backend data directory.
    pub fn dir_name(&self) -> &'static str {
        self.param_value()
    }
}

impl std::fmt::Display for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Query mode
// =============================================================================

/// The active query path.
///
/// An explicit tagged variant rather than implicit branching on query
/// content: row-click behaviour, drill-down, and chronological paging
/// are all keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Filtered path returning field-decomposed rows that support
    /// row-level drill-down and "Load older" paging.
    #[default]
    Structured,
    /// Free-form SQL path whose results are tabular only.
    RawSql,
}

impl QueryMode {
    /// Returns all variants in display order.
    pub fn all() -> &'static [QueryMode] {
        &[QueryMode::Structured, QueryMode::RawSql]
    }

    /// Human-readable label for the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            QueryMode::Structured => "Filtered",
            QueryMode::RawSql => "Custom SQL",
        }
    }

    /// Whether row-level inspection (the detail panel) is available.
    pub fn supports_drilldown(&self) -> bool {
        matches!(self, QueryMode::Structured)
    }

    /// Whether chronological paging ("Load older") is available.
    pub fn supports_paging(&self) -> bool {
        matches!(self, QueryMode::Structured)
    }
}

// =============================================================================
// Query state
// =============================================================================

/// How a run was triggered. Both paths funnel into the same run logic;
/// the trigger is kept for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTrigger {
    /// The explicit Run button.
    Button,
    /// Ctrl+Enter while the editor has focus.
    Chord,
}

/// The editor's query state.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// Current editor text, mutated by user typing.
    pub text: String,

    /// Text of the most recent run. Updates only on an explicit or
    /// chord-triggered run, never on typing.
    pub last_run_text: Option<String>,
}

// =============================================================================
// Time range
// =============================================================================

/// The queried time range. Both bounds are inclusive.
///
/// Order is a caller contract (`start <= end`); an inverted range is
/// not an error, it simply matches no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Span of the range, clamped at zero for inverted ranges.
    pub fn span(&self) -> chrono::Duration {
        (self.end - self.start).max(chrono::Duration::zero())
    }
}

/// Quick-pick options for the range dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    LastHour,
    LastDay,
    Last3Days,
    Last7Days,
    Last28Days,
    Last90Days,
}

impl QuickRange {
    /// Returns all options in menu order.
    pub fn all() -> &'static [QuickRange] {
        &[
            QuickRange::LastHour,
            QuickRange::LastDay,
            QuickRange::Last3Days,
            QuickRange::Last7Days,
            QuickRange::Last28Days,
            QuickRange::Last90Days,
        ]
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            QuickRange::LastHour => "Last hour",
            QuickRange::LastDay => "Last 24 hours",
            QuickRange::Last3Days => "Last 3 days",
            QuickRange::Last7Days => "Last 7 days",
            QuickRange::Last28Days => "Last 28 days",
            QuickRange::Last90Days => "Last 90 days",
        }
    }

    /// Span of the option.
    pub fn span(&self) -> chrono::Duration {
        match self {
            QuickRange::LastHour => chrono::Duration::hours(1),
            QuickRange::LastDay => chrono::Duration::days(1),
            QuickRange::Last3Days => chrono::Duration::days(3),
            QuickRange::Last7Days => chrono::Duration::days(7),
            QuickRange::Last28Days => chrono::Duration::days(28),
            QuickRange::Last90Days => chrono::Duration::days(90),
        }
    }

    /// The range ending at `now`.
    pub fn range_ending_at(&self, now: DateTime<Utc>) -> TimeRange {
        TimeRange {
            start: now - self.span(),
            end: now,
        }
    }
}

// =============================================================================
// Results (dynamic schema)
// =============================================================================

/// A single result row: a JSON object with at least a `timestamp`
/// field and arbitrary nested metadata.
pub type ResultRow = serde_json::Value;

/// Name of the field every row is expected to carry.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// A rendered result set with columns derived from the first row's
/// shape.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// Column names: `timestamp` first when present, then the first
    /// row's remaining top-level keys.
    pub columns: Vec<String>,

    /// Rows in the order the backend returned them (newest first).
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    /// Derive the column set from the first row and take ownership of
    /// the rows. An empty input produces an empty set.
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        let columns = rows.first().map(derive_columns).unwrap_or_default();
        Self { columns, rows }
    }

    /// Append a further page of rows, keeping the existing schema.
    pub fn extend_page(&mut self, rows: Vec<ResultRow>) {
        if self.columns.is_empty() {
            if let Some(first) = rows.first() {
                self.columns = derive_columns(first);
            }
        }
        self.rows.extend(rows);
    }

    /// Timestamp of the oldest loaded row, used as the "Load older"
    /// paging cursor.
    pub fn oldest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.rows.iter().filter_map(row_timestamp).min()
    }
}

/// Column names for a row: `timestamp` first when present, then the
/// remaining top-level keys in map order. Non-object rows get a single
/// `value` column.
fn derive_columns(row: &ResultRow) -> Vec<String> {
    match row.as_object() {
        Some(map) => {
            let mut columns = Vec::with_capacity(map.len());
            if map.contains_key(TIMESTAMP_FIELD) {
                columns.push(TIMESTAMP_FIELD.to_string());
            }
            for key in map.keys() {
                if key != TIMESTAMP_FIELD {
                    columns.push(key.clone());
                }
            }
            columns
        }
        None => vec!["value".to_string()],
    }
}

/// Parse a row's `timestamp` field as an RFC 3339 instant.
pub fn row_timestamp(row: &ResultRow) -> Option<DateTime<Utc>> {
    row.get(TIMESTAMP_FIELD)
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// =============================================================================
// Backend request/reply
// =============================================================================

/// A single query submission to the execution backend.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub source: LogSource,
    pub mode: QueryMode,

    /// Query text. Interpretation is the backend's concern.
    pub text: String,

    /// Requested time range.
    pub range: TimeRange,

    /// Maximum rows to return.
    pub limit: usize,

    /// Paging cursor: only rows strictly older than this instant are
    /// returned. `None` for the first page.
    pub before: Option<DateTime<Utc>>,
}

/// The backend's answer to a `QueryRequest`.
#[derive(Debug, Clone, Default)]
pub struct QueryReply {
    /// Matching rows, newest first.
    pub rows: Vec<ResultRow>,

    /// Non-fatal warnings accumulated during execution.
    pub warnings: Vec<String>,

    /// Number of data files consulted.
    pub scanned_files: usize,

    /// Wall-clock execution time.
    pub elapsed: Duration,
}

// =============================================================================
// Query progress (for UI updates)
// =============================================================================

/// Progress messages sent from the run thread to the UI thread.
///
/// Every message carries the run id it belongs to; the UI drops
/// messages from superseded runs at the poll site.
#[derive(Debug)]
pub enum QueryProgress {
    /// The run thread has started executing.
    Started { run_id: u64 },

    /// The run finished successfully.
    Completed { run_id: u64, reply: QueryReply },

    /// The run failed. The editor contents are preserved; the error is
    /// surfaced in the status line.
    Failed { run_id: u64, error: String },
}

impl QueryProgress {
    /// The run id this message belongs to.
    pub fn run_id(&self) -> u64 {
        match self {
            QueryProgress::Started { run_id }
            | QueryProgress::Completed { run_id, .. }
            | QueryProgress::Failed { run_id, .. } => *run_id,
        }
    }
}

// =============================================================================
// Plan tier
// =============================================================================

/// Subscription plan tier. Decided by the (out-of-scope) billing
/// layer; consumed here as a config/CLI input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Team,
    Enterprise,
}

impl PlanTier {
    /// Returns all variants, smallest allowance first.
    pub fn all() -> &'static [PlanTier] {
        &[
            PlanTier::Free,
            PlanTier::Pro,
            PlanTier::Team,
            PlanTier::Enterprise,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Pro => "Pro",
            PlanTier::Team => "Team",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    /// Parse a tier name. Matching is case-insensitive.
    pub fn from_name(value: &str) -> Option<PlanTier> {
        match value.to_lowercase().as_str() {
            "free" => Some(PlanTier::Free),
            "pro" => Some(PlanTier::Pro),
            "team" => Some(PlanTier::Team),
            "enterprise" => Some(PlanTier::Enterprise),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
