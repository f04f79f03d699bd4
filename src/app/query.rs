// LogLens - app/query.rs
//
// Run lifecycle management. Executes queries on a background thread,
// sending progress messages to the UI thread via an mpsc channel.
//
// Architecture:
//   - `QueryManager` lives on the UI thread; `run_query` runs on a
//     background thread holding the backend behind an Arc.
//   - Each run gets a monotonic run id and a fresh channel. A new run
//     supersedes the previous one: the old receiver is dropped, the
//     old thread's sends fail, and it exits quietly. In-flight work is
//     NOT cancelled; stale messages are dropped by run-id tag at the
//     poll site, so display is last-write-wins.

use crate::backend::QueryBackend;
use crate::core::model::{QueryProgress, QueryRequest};
use std::sync::mpsc;
use std::sync::Arc;

/// Manages query runs on background threads.
pub struct QueryManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<QueryProgress>>,

    /// Id of the most recently started run. Messages tagged with any
    /// other id are stale and dropped.
    current_run_id: u64,
}

impl QueryManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            current_run_id: 0,
        }
    }

    /// Id of the run whose messages are currently accepted.
    pub fn current_run_id(&self) -> u64 {
        self.current_run_id
    }

    /// Start a run, superseding any run still in flight.
    ///
    /// Spawns a background thread immediately; progress arrives over
    /// the channel. Returns the new run's id.
    pub fn start_run(&mut self, request: QueryRequest, backend: Arc<dyn QueryBackend>) -> u64 {
        self.current_run_id += 1;
        let run_id = self.current_run_id;

        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        std::thread::spawn(move || {
            run_query(run_id, request, backend, tx);
        });

        tracing::info!(run_id, "Query run started");
        run_id
    }

    /// Poll for progress messages without blocking, up to `budget`
    /// messages. Stale messages are dropped here.
    pub fn poll_progress(&self, budget: usize) -> Vec<QueryProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < budget {
                match rx.try_recv() {
                    Ok(msg) if msg.run_id() == self.current_run_id => messages.push(msg),
                    Ok(msg) => {
                        tracing::debug!(
                            stale = msg.run_id(),
                            current = self.current_run_id,
                            "Dropped superseded run message"
                        );
                    }
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for QueryManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Background run body: execute against the backend, report the outcome.
fn run_query(
    run_id: u64,
    request: QueryRequest,
    backend: Arc<dyn QueryBackend>,
    tx: mpsc::Sender<QueryProgress>,
) {
    // Receiver dropped (superseded run or UI closed): exit quietly.
    if tx.send(QueryProgress::Started { run_id }).is_err() {
        return;
    }

    match backend.execute(&request) {
        Ok(reply) => {
            tracing::debug!(run_id, rows = reply.rows.len(), "Run completed");
            let _ = tx.send(QueryProgress::Completed { run_id, reply });
        }
        Err(e) => {
            tracing::warn!(run_id, error = %e, "Run failed");
            let _ = tx.send(QueryProgress::Failed {
                run_id,
                error: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LogSource, QueryMode, QueryReply, TimeRange};
    use crate::util::error::BackendError;
    use serde_json::json;
    use std::time::Duration;

    /// Backend that sleeps then answers with a tagged row.
    struct StubBackend {
        delay: Duration,
        tag: &'static str,
        fail: bool,
    }

    impl QueryBackend for StubBackend {
        fn execute(&self, _request: &QueryRequest) -> Result<QueryReply, BackendError> {
            std::thread::sleep(self.delay);
            if self.fail {
                return Err(BackendError::TooManyFiles { max: 1 });
            }
            Ok(QueryReply {
                rows: vec![json!({"timestamp": "2026-08-06T10:00:00Z", "tag": self.tag})],
                ..Default::default()
            })
        }
    }

    fn request() -> QueryRequest {
        QueryRequest {
            source: LogSource::Api,
            mode: QueryMode::Structured,
            text: String::new(),
            range: TimeRange {
                start: "2026-01-01T00:00:00Z".parse().unwrap(),
                end: "2026-12-31T00:00:00Z".parse().unwrap(),
            },
            limit: 10,
            before: None,
        }
    }

    /// Poll until a terminal message arrives or the deadline passes.
    fn poll_until_terminal(manager: &QueryManager) -> Vec<QueryProgress> {
        let mut collected = Vec::new();
        for _ in 0..200 {
            collected.extend(manager.poll_progress(100));
            if collected
                .iter()
                .any(|m| matches!(m, QueryProgress::Completed { .. } | QueryProgress::Failed { .. }))
            {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        collected
    }

    #[test]
    fn test_run_completes_with_reply() {
        let mut manager = QueryManager::new();
        let backend = Arc::new(StubBackend {
            delay: Duration::from_millis(0),
            tag: "only",
            fail: false,
        });
        let run_id = manager.start_run(request(), backend);

        let messages = poll_until_terminal(&manager);
        let reply = messages
            .iter()
            .find_map(|m| match m {
                QueryProgress::Completed { run_id: id, reply } if *id == run_id => Some(reply),
                _ => None,
            })
            .expect("run must complete");
        assert_eq!(reply.rows[0]["tag"], "only");
    }

    #[test]
    fn test_failure_is_reported_not_panicked() {
        let mut manager = QueryManager::new();
        let backend = Arc::new(StubBackend {
            delay: Duration::from_millis(0),
            tag: "unused",
            fail: true,
        });
        manager.start_run(request(), backend);

        let messages = poll_until_terminal(&manager);
        assert!(messages
            .iter()
            .any(|m| matches!(m, QueryProgress::Failed { .. })));
    }

    #[test]
    fn test_new_run_supersedes_pending_one() {
        let mut manager = QueryManager::new();
        let slow = Arc::new(StubBackend {
            delay: Duration::from_millis(300),
            tag: "slow",
            fail: false,
        });
        let fast = Arc::new(StubBackend {
            delay: Duration::from_millis(0),
            tag: "fast",
            fail: false,
        });

        manager.start_run(request(), slow);
        let second = manager.start_run(request(), fast);

        let messages = poll_until_terminal(&manager);
        // Give the slow thread time to finish and (fail to) send.
        std::thread::sleep(Duration::from_millis(400));
        let late = manager.poll_progress(100);

        for msg in messages.iter().chain(late.iter()) {
            assert_eq!(msg.run_id(), second, "stale message leaked: {msg:?}");
            if let QueryProgress::Completed { reply, .. } = msg {
                assert_eq!(reply.rows[0]["tag"], "fast");
            }
        }
    }

    #[test]
    fn test_poll_budget_is_respected() {
        let manager = QueryManager::new();
        assert!(manager.poll_progress(5).is_empty());
    }
}
