// LogLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Launch parameters
// =============================================================================

/// Launch parameter carrying the initial query text.
pub const PARAM_QUERY: &str = "q";

/// Launch parameter carrying the log source type.
pub const PARAM_SOURCE: &str = "type";

/// Launch parameter carrying the range start (RFC 3339).
pub const PARAM_RANGE_START: &str = "its";

/// Launch parameter carrying the range end (RFC 3339).
pub const PARAM_RANGE_END: &str = "ite";

// =============================================================================
// Query limits
// =============================================================================

/// Default number of rows requested per run.
pub const DEFAULT_ROW_LIMIT: usize = 100;

/// Minimum user-configurable row limit.
pub const MIN_ROW_LIMIT: usize = 1;

/// Maximum user-configurable row limit.
pub const MAX_ROW_LIMIT: usize = 1_000;

/// Hard upper bound on result rows held in memory at once, including
/// rows accumulated through "Load older" paging. When the cap is
/// reached further pages are refused with a status message.
pub const MAX_RESULT_ROWS: usize = 10_000;

/// Maximum length of the query text in characters. Longer input is
/// refused at run time with a status message rather than truncated.
pub const MAX_QUERY_LENGTH: usize = 10_000;

/// Default time window (hours) when no range is supplied at launch.
pub const DEFAULT_RANGE_HOURS: i64 = 1;

// =============================================================================
// Retention defaults
// =============================================================================
//
// Allowances are an external policy input; these defaults apply when
// config.toml carries no [retention] overrides. The numbers follow the
// hosted plan matrix: a "Last 3 days" quick pick must block on Free
// only, and a 5-month range must block on every tier.

/// Free tier retention allowance in days.
pub const RETENTION_FREE_DAYS: i64 = 1;

/// Pro tier retention allowance in days.
pub const RETENTION_PRO_DAYS: i64 = 7;

/// Team tier retention allowance in days.
pub const RETENTION_TEAM_DAYS: i64 = 28;

/// Enterprise tier retention allowance in days.
pub const RETENTION_ENTERPRISE_DAYS: i64 = 90;

/// Largest accepted [retention] override in days. Guards against
/// configuration typos (e.g. hours pasted as days).
pub const MAX_RETENTION_DAYS: i64 = 3_650;

// =============================================================================
// Backend limits
// =============================================================================

/// Maximum number of data files consulted for a single query.
pub const MAX_BACKEND_FILES: usize = 500;

/// File size threshold in bytes above which data files are
/// memory-mapped instead of read into a heap buffer.
pub const LARGE_FILE_THRESHOLD: u64 = 8 * 1024 * 1024; // 8 MiB

/// Maximum directory recursion depth when locating data files.
pub const MAX_DATA_DEPTH: usize = 4;

/// Default include glob patterns for backend data files.
pub const DATA_INCLUDE_PATTERNS: &[&str] = &["*.ndjson", "*.jsonl"];

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of query-progress messages processed by the UI update
/// loop per frame. Remaining messages are left in the channel and
/// handled on subsequent frames so a burst cannot stall the render loop.
pub const MAX_QUERY_MESSAGES_PER_FRAME: usize = 100;

/// Maximum number of non-fatal warnings retained for display.
pub const MAX_WARNINGS: usize = 100;

// =============================================================================
// Saved queries
// =============================================================================

/// Maximum number of saved queries kept in the store.
pub const MAX_SAVED_QUERIES: usize = 100;

/// Maximum length of a saved-query name in characters.
pub const MAX_SAVED_QUERY_NAME: usize = 120;

/// Saved-query store file name (stored in the platform data directory).
pub const SAVED_QUERIES_FILE_NAME: &str = "saved_queries.json";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum characters shown for a single value in compact views (the
/// detail panel's field grid). Full values remain available in the
/// pretty-printed JSON below it.
pub const MAX_CELL_CHARS: usize = 120;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Backend data subdirectory name under the platform data directory.
pub const DATA_SUBDIR_NAME: &str = "logs";
