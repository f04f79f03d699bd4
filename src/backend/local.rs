// LogLens - backend/local.rs
//
// Local reference backend: serves query results from NDJSON files
// under `<data_dir>/<source>/`. One JSON object per line, each with an
// RFC 3339 `timestamp` field.
//
// Per-file errors are non-fatal: unreadable files and malformed lines
// become warnings on the reply, and the query continues. Large files
// are memory-mapped instead of copied onto the heap.

use crate::backend::QueryBackend;
use crate::core::model::{self, QueryReply, QueryRequest, ResultRow};
use crate::util::constants;
use crate::util::error::BackendError;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Retry limits for transient I/O errors.
const MAX_RETRIES: u32 = 3;
const RETRY_DELAYS_MS: [u64; 3] = [50, 100, 200];

/// Prefix marking a regex match expression in the query text.
const REGEX_PREFIX: &str = "re:";

// =============================================================================
// LocalBackend
// =============================================================================

/// NDJSON-directory backend.
pub struct LocalBackend {
    data_dir: PathBuf,
    include: Vec<glob::Pattern>,
}

impl LocalBackend {
    /// Create a backend rooted at `data_dir`, using the default
    /// include patterns for data files.
    pub fn new(data_dir: PathBuf) -> Result<Self, BackendError> {
        let mut include = Vec::with_capacity(constants::DATA_INCLUDE_PATTERNS.len());
        for pattern in constants::DATA_INCLUDE_PATTERNS {
            include.push(glob::Pattern::new(pattern).map_err(|e| {
                BackendError::InvalidPattern {
                    pattern: (*pattern).to_string(),
                    source: e,
                }
            })?);
        }
        Ok(Self { data_dir, include })
    }

    /// Data files for a source, bounded by `MAX_BACKEND_FILES`.
    /// Traversal errors on individual entries become warnings.
    fn collect_files(
        &self,
        source_dir: &Path,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<PathBuf>, BackendError> {
        let mut files = Vec::new();

        for entry in walkdir::WalkDir::new(source_dir)
            .max_depth(constants::MAX_DATA_DEPTH)
            .follow_links(false)
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warnings.push(format!("Skipped unreadable entry: {e}"));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !self.include.iter().any(|p| p.matches(&name)) {
                continue;
            }
            if files.len() >= constants::MAX_BACKEND_FILES {
                return Err(BackendError::TooManyFiles {
                    max: constants::MAX_BACKEND_FILES,
                });
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }
}

impl QueryBackend for LocalBackend {
    fn execute(&self, request: &QueryRequest) -> Result<QueryReply, BackendError> {
        let started = Instant::now();

        if !self.data_dir.exists() {
            return Err(BackendError::DataDirNotFound {
                path: self.data_dir.clone(),
            });
        }
        if !self.data_dir.is_dir() {
            return Err(BackendError::NotADirectory {
                path: self.data_dir.clone(),
            });
        }

        let mut warnings = Vec::new();

        // A missing per-source directory is an empty source, not a
        // configuration error.
        let source_dir = self.data_dir.join(request.source.dir_name());
        if !source_dir.is_dir() {
            warnings.push(format!(
                "No data for source '{}' under '{}'",
                request.source,
                self.data_dir.display()
            ));
            return Ok(QueryReply {
                warnings,
                elapsed: started.elapsed(),
                ..Default::default()
            });
        }

        let matcher = Matcher::parse(&request.text)?;
        let files = self.collect_files(&source_dir, &mut warnings)?;
        let limit = request.limit.clamp(constants::MIN_ROW_LIMIT, constants::MAX_ROW_LIMIT);

        let mut rows: Vec<(DateTime<Utc>, ResultRow)> = Vec::new();
        let mut scanned_files = 0usize;

        for path in &files {
            let content = match read_data_file(path) {
                Ok(c) => c,
                Err(e) => {
                    let msg = format!("Cannot read '{}': {e}", path.display());
                    tracing::warn!(warning = %msg, "Data file read failed");
                    warnings.push(msg);
                    continue;
                }
            };
            scanned_files += 1;

            let lines: Vec<&str> = content.lines().collect();
            let outcomes: Vec<LineOutcome> = lines
                .par_iter()
                .map(|line| classify_line(line, &matcher, request))
                .collect();

            let mut malformed = 0usize;
            let mut timestampless = 0usize;
            for outcome in outcomes {
                match outcome {
                    LineOutcome::Match(ts, row) => rows.push((ts, row)),
                    LineOutcome::NoMatch => {}
                    LineOutcome::Malformed => malformed += 1,
                    LineOutcome::NoTimestamp => timestampless += 1,
                }
            }
            if malformed > 0 {
                warnings.push(format!(
                    "'{}': {malformed} malformed line(s) skipped",
                    path.display()
                ));
            }
            if timestampless > 0 {
                warnings.push(format!(
                    "'{}': {timestampless} line(s) without a parseable timestamp skipped",
                    path.display()
                ));
            }
        }

        // Newest first, then trim to the requested page size.
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows.truncate(limit);

        tracing::debug!(
            source = %request.source,
            files = scanned_files,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Local query complete"
        );

        Ok(QueryReply {
            rows: rows.into_iter().map(|(_, row)| row).collect(),
            warnings,
            scanned_files,
            elapsed: started.elapsed(),
        })
    }
}

// =============================================================================
// Line classification
// =============================================================================

enum LineOutcome {
    /// Parsed, inside the range, and matching the query text.
    Match(DateTime<Utc>, ResultRow),
    /// Parsed but filtered out.
    NoMatch,
    /// Not a JSON object.
    Malformed,
    /// Missing or unparseable `timestamp` field.
    NoTimestamp,
}

fn classify_line(line: &str, matcher: &Matcher, request: &QueryRequest) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::NoMatch;
    }

    let row: ResultRow = match serde_json::from_str(trimmed) {
        Ok(serde_json::Value::Object(map)) => serde_json::Value::Object(map),
        Ok(_) | Err(_) => return LineOutcome::Malformed,
    };

    let Some(ts) = model::row_timestamp(&row) else {
        return LineOutcome::NoTimestamp;
    };

    if ts < request.range.start || ts > request.range.end {
        return LineOutcome::NoMatch;
    }
    if let Some(before) = request.before {
        if ts >= before {
            return LineOutcome::NoMatch;
        }
    }
    if !matcher.matches(trimmed) {
        return LineOutcome::NoMatch;
    }

    LineOutcome::Match(ts, row)
}

// =============================================================================
// Match expression
// =============================================================================

/// Interpretation of the query text over raw NDJSON lines.
///
/// Both modes share this interpretation in the reference backend; a
/// production deployment substitutes a backend that executes the text
/// for real. Empty text matches everything; a `re:` prefix switches
/// from case-insensitive substring to regex matching.
enum Matcher {
    All,
    Substring(String),
    Regex(regex::Regex),
}

impl Matcher {
    fn parse(text: &str) -> Result<Matcher, BackendError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Matcher::All);
        }
        if let Some(pattern) = trimmed.strip_prefix(REGEX_PREFIX) {
            let regex = regex::Regex::new(pattern).map_err(|e| BackendError::InvalidMatchExpr {
                pattern: pattern.to_string(),
                source: e,
            })?;
            return Ok(Matcher::Regex(regex));
        }
        Ok(Matcher::Substring(trimmed.to_lowercase()))
    }

    fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Substring(needle) => line.to_lowercase().contains(needle),
            Matcher::Regex(regex) => regex.is_match(line),
        }
    }
}

// =============================================================================
// File reading
// =============================================================================

/// Read a data file as UTF-8. Files over the large-file threshold are
/// memory-mapped; smaller files are read with transient-error retries.
fn read_data_file(path: &Path) -> io::Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > constants::LARGE_FILE_THRESHOLD {
        read_large_file(path)
    } else {
        read_small_file_with_retry(path)
    }
}

fn read_large_file(path: &Path) -> io::Result<String> {
    let file = std::fs::File::open(path)?;
    // SAFETY: the file is read-only and we do not mutate the map.
    // External modification during the map's lifetime is the documented
    // risk, acceptable for already-written data files.
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    std::str::from_utf8(&mmap)
        .map(|s| s.to_string())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn read_small_file_with_retry(path: &Path) -> io::Result<String> {
    let mut last_err: Option<io::Error> = None;

    for attempt in 0..MAX_RETRIES {
        match std::fs::read_to_string(path) {
            Ok(content) => return Ok(content),
            Err(e) if is_transient_error(&e) => {
                tracing::debug!(
                    file = %path.display(),
                    attempt = attempt + 1,
                    error = %e,
                    "Transient I/O error, retrying"
                );
                std::thread::sleep(Duration::from_millis(RETRY_DELAYS_MS[attempt as usize]));
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::other("Unknown read error")))
}

fn is_transient_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    )
}
