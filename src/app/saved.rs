// LogLens - app/saved.rs
//
// Saved-query persistence: the "Save query" affordance writes named
// queries to a versioned JSON store in the platform data directory.
//
// Design principles:
// - The store is saved atomically (write→temp, rename→final) so a
//   crash during save never corrupts the previous good store.
// - Load errors are silently discarded (corrupt or incompatible stores
//   just start empty rather than surfacing errors to the user).
// - The data directory is created on first save; no user action required.

use crate::core::model::LogSource;
use crate::util::constants;
use crate::util::error::SavedQueryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment whenever `StoreData` changes in a breaking way. Version
/// mismatches silently discard the store.
pub const STORE_VERSION: u32 = 1;

/// A single saved query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedQuery {
    /// User-supplied name.
    pub name: String,

    /// Query text.
    pub text: String,

    /// Source the query was written against.
    pub source: LogSource,

    /// When the query was saved.
    pub created_at: DateTime<Utc>,
}

/// On-disk shape of the store file.
#[derive(Debug, Serialize, Deserialize)]
struct StoreData {
    version: u32,
    #[serde(default)]
    queries: Vec<SavedQuery>,
}

/// The saved-query store: in-memory list plus its backing file.
#[derive(Debug)]
pub struct SavedQueryStore {
    /// Backing file. `None` for an in-memory store (tests, or when no
    /// data directory could be resolved).
    path: Option<PathBuf>,

    /// Saved queries, newest first.
    pub queries: Vec<SavedQuery>,
}

impl SavedQueryStore {
    /// Load the store from `<data_dir>/saved_queries.json`.
    ///
    /// A missing, corrupt, or version-incompatible file yields an
    /// empty store.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(constants::SAVED_QUERIES_FILE_NAME);
        let queries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<StoreData>(&content) {
                Ok(data) if data.version == STORE_VERSION => data.queries,
                Ok(data) => {
                    tracing::warn!(
                        found = data.version,
                        expected = STORE_VERSION,
                        "Saved-query store version mismatch; starting empty"
                    );
                    Vec::new()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Saved-query store unreadable; starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(), // First run.
        };

        Self {
            path: Some(path),
            queries,
        }
    }

    /// A store with no backing file. Saves become no-ops.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            queries: Vec::new(),
        }
    }

    /// Add a query and persist the store.
    pub fn add(
        &mut self,
        name: &str,
        text: &str,
        source: LogSource,
        now: DateTime<Utc>,
    ) -> Result<(), SavedQueryError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > constants::MAX_SAVED_QUERY_NAME {
            return Err(SavedQueryError::BadName {
                name: name.to_string(),
                max_len: constants::MAX_SAVED_QUERY_NAME,
            });
        }
        if self.queries.len() >= constants::MAX_SAVED_QUERIES {
            return Err(SavedQueryError::TooMany {
                count: self.queries.len(),
                max: constants::MAX_SAVED_QUERIES,
            });
        }

        // Re-saving under an existing name replaces the old entry.
        self.queries.retain(|q| q.name != name);
        self.queries.insert(
            0,
            SavedQuery {
                name: name.to_string(),
                text: text.to_string(),
                source,
                created_at: now,
            },
        );
        self.persist()
    }

    /// Remove the query at `index` and persist the store.
    pub fn remove(&mut self, index: usize) -> Result<(), SavedQueryError> {
        if index < self.queries.len() {
            self.queries.remove(index);
            self.persist()?;
        }
        Ok(())
    }

    /// Write the store atomically: serialise to a sibling temp file,
    /// then rename over the final path.
    fn persist(&self) -> Result<(), SavedQueryError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SavedQueryError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let data = StoreData {
            version: STORE_VERSION,
            queries: self.queries.clone(),
        };
        let json = serde_json::to_string_pretty(&data).map_err(|e| SavedQueryError::Json {
            path: path.clone(),
            source: e,
        })?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(|e| SavedQueryError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, path).map_err(|e| SavedQueryError::Io {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(count = self.queries.len(), path = %path.display(), "Saved-query store written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_now() -> DateTime<Utc> {
        "2026-08-06T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = SavedQueryStore::load(tmp.path());
        store
            .add("errors", "status:500", LogSource::Api, test_now())
            .unwrap();
        store
            .add("logins", "login", LogSource::Auth, test_now())
            .unwrap();

        let reloaded = SavedQueryStore::load(tmp.path());
        assert_eq!(reloaded.queries.len(), 2);
        assert_eq!(reloaded.queries[0].name, "logins");
        assert_eq!(reloaded.queries[1].text, "status:500");
    }

    #[test]
    fn test_resave_replaces_same_name() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = SavedQueryStore::load(tmp.path());
        store.add("q", "old", LogSource::Api, test_now()).unwrap();
        store.add("q", "new", LogSource::Api, test_now()).unwrap();
        assert_eq!(store.queries.len(), 1);
        assert_eq!(store.queries[0].text, "new");
    }

    #[test]
    fn test_version_mismatch_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(constants::SAVED_QUERIES_FILE_NAME),
            r#"{"version": 99, "queries": [{"name":"x","text":"y","source":"api","created_at":"2026-08-06T12:00:00Z"}]}"#,
        )
        .unwrap();
        let store = SavedQueryStore::load(tmp.path());
        assert!(store.queries.is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(constants::SAVED_QUERIES_FILE_NAME), "{oops").unwrap();
        let store = SavedQueryStore::load(tmp.path());
        assert!(store.queries.is_empty());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut store = SavedQueryStore::in_memory();
        let result = store.add("   ", "text", LogSource::Api, test_now());
        assert!(matches!(result, Err(SavedQueryError::BadName { .. })));
    }

    #[test]
    fn test_remove_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = SavedQueryStore::load(tmp.path());
        store.add("a", "1", LogSource::Api, test_now()).unwrap();
        store.add("b", "2", LogSource::Api, test_now()).unwrap();
        store.remove(0).unwrap();

        let reloaded = SavedQueryStore::load(tmp.path());
        assert_eq!(reloaded.queries.len(), 1);
        assert_eq!(reloaded.queries[0].name, "a");
    }
}
