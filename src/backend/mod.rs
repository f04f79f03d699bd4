// LogLens - backend/mod.rs
//
// Query-execution seam. The execution service itself is an external
// collaborator; the application depends only on this trait. The
// bundled `LocalBackend` serves NDJSON files from disk so the full
// flow works offline.

pub mod local;

use crate::core::model::{QueryReply, QueryRequest};
use crate::util::error::BackendError;

/// The query-execution contract.
///
/// Implementations must be callable from a background thread; the
/// query manager never executes on the UI thread.
pub trait QueryBackend: Send + Sync {
    /// Execute a single query and return the matching rows,
    /// newest first, bounded by `request.limit`.
    fn execute(&self, request: &QueryRequest) -> Result<QueryReply, BackendError>;
}
