// LogLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps its causal
// chain available for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ExplorerError {
    /// Launch parameter parsing failed.
    Params(ParamError),

    /// Query execution against the backend failed.
    Backend(BackendError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Saved-query store operation failed.
    Saved(SavedQueryError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params(e) => write!(f, "Parameter error: {e}"),
            Self::Backend(e) => write!(f, "Backend error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Saved(e) => write!(f, "Saved-query error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Params(e) => Some(e),
            Self::Backend(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Saved(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter errors
// ---------------------------------------------------------------------------

/// Errors from launch-parameter parsing.
///
/// These are never fatal: the ingestor logs the error and leaves the
/// corresponding UI element at its default.
#[derive(Debug)]
pub enum ParamError {
    /// A timestamp parameter was not valid RFC 3339.
    BadTimestamp {
        name: &'static str,
        value: String,
        source: chrono::ParseError,
    },

    /// The `type` parameter named an unknown log source.
    UnknownSource { value: String },

    /// A parameter pair was not of the form `key=value`.
    MalformedPair { pair: String },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadTimestamp {
                name,
                value,
                source,
            } => write!(f, "'{name}={value}' is not a valid RFC 3339 instant: {source}"),
            Self::UnknownSource { value } => {
                write!(f, "'{value}' is not a recognised log source")
            }
            Self::MalformedPair { pair } => {
                write!(f, "'{pair}' is not a key=value pair")
            }
        }
    }
}

impl std::error::Error for ParamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadTimestamp { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParamError> for ExplorerError {
    fn from(e: ParamError) -> Self {
        Self::Params(e)
    }
}

// ---------------------------------------------------------------------------
// Backend errors
// ---------------------------------------------------------------------------

/// Errors from the query-execution backend.
#[derive(Debug)]
pub enum BackendError {
    /// The backend data directory does not exist.
    DataDirNotFound { path: PathBuf },

    /// The backend data path is not a directory.
    NotADirectory { path: PathBuf },

    /// A configured include pattern is invalid.
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// A `re:`-prefixed match expression failed to compile.
    InvalidMatchExpr {
        pattern: String,
        source: regex::Error,
    },

    /// Maximum file count exceeded while locating data files.
    TooManyFiles { max: usize },

    /// Directory traversal failed.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// I/O error while reading a data file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataDirNotFound { path } => {
                write!(f, "Data directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Data path '{}' is not a directory", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid include pattern '{pattern}': {source}")
            }
            Self::InvalidMatchExpr { pattern, source } => {
                write!(f, "Invalid match expression '{pattern}': {source}")
            }
            Self::TooManyFiles { max } => write!(
                f,
                "Query stopped: more than {max} data files match. \
                 Narrow the source or archive old files."
            ),
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::InvalidMatchExpr { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<BackendError> for ExplorerError {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading the config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ExplorerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Saved-query errors
// ---------------------------------------------------------------------------

/// Errors from the saved-query store.
#[derive(Debug)]
pub enum SavedQueryError {
    /// JSON serialisation or deserialisation failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The store already holds the maximum number of queries.
    TooMany { count: usize, max: usize },

    /// The supplied name is empty or exceeds the length limit.
    BadName { name: String, max_len: usize },

    /// I/O error reading or writing the store file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SavedQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { path, source } => {
                write!(f, "Saved-query JSON error '{}': {source}", path.display())
            }
            Self::TooMany { count, max } => write!(
                f,
                "Cannot save: store holds {count} queries, maximum is {max}. \
                 Delete unused queries first."
            ),
            Self::BadName { name, max_len } => write!(
                f,
                "'{name}' is not a usable query name (must be 1-{max_len} characters)"
            ),
            Self::Io { path, source } => {
                write!(f, "Saved-query I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SavedQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SavedQueryError> for ExplorerError {
    fn from(e: SavedQueryError) -> Self {
        Self::Saved(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for ExplorerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for LogLens results.
pub type Result<T> = std::result::Result<T, ExplorerError>;
