// LogLens - tests/e2e_explorer.rs
//
// End-to-end tests for the explorer flow: launch parameters seed the
// state, runs execute against the real local backend over on-disk
// fixtures, and the results drive selection and panel behaviour.
// No mocks: real filesystem, real walkdir traversal, real chrono
// parsing, real background run threads.

use loglens::app::query::QueryManager;
use loglens::app::saved::SavedQueryStore;
use loglens::app::state::ExplorerState;
use loglens::backend::local::LocalBackend;
use loglens::backend::QueryBackend;
use loglens::core::actions::UiEvent;
use loglens::core::model::{PlanTier, QueryMode, QueryProgress, QuickRange, RunTrigger};
use loglens::core::params::NavParams;
use loglens::core::retention::RetentionPolicy;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture data directory.
fn fixture_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture_backend() -> Arc<dyn QueryBackend> {
    Arc::new(LocalBackend::new(fixture_data_dir()).unwrap())
}

/// A fixed "now" inside the fixture window, so tests are independent
/// of the wall clock.
fn test_now() -> DateTime<Utc> {
    "2026-08-02T00:00:00Z".parse().unwrap()
}

/// One-day range covering all rows in `edge.ndjson` (but not the
/// rotated file's rows from the previous evening).
const PARAMS_ONE_DAY: &str = "type=api&its=2026-08-01T00:00:00Z&ite=2026-08-02T00:00:00Z";

fn state_with(raw_params: &str, tier: PlanTier) -> ExplorerState {
    let (params, _) = NavParams::parse(raw_params);
    ExplorerState::from_params(
        &params,
        RetentionPolicy::for_tier(tier),
        100,
        SavedQueryStore::in_memory(),
        test_now(),
    )
}

/// Drive a pending run to completion: consume the request, execute it
/// on the manager's background thread, poll, and apply the outcome.
fn complete_pending_run(
    state: &mut ExplorerState,
    manager: &mut QueryManager,
    backend: &Arc<dyn QueryBackend>,
) {
    let request = state
        .take_run_request()
        .or_else(|| state.take_load_older_request())
        .expect("a run must be pending");
    manager.start_run(request, Arc::clone(backend));

    for _ in 0..500 {
        let mut done = false;
        for msg in manager.poll_progress(100) {
            match msg {
                QueryProgress::Started { .. } => {}
                QueryProgress::Completed { reply, .. } => {
                    state.apply_reply(reply);
                    done = true;
                }
                QueryProgress::Failed { error, .. } => {
                    state.apply_failure(&error);
                    done = true;
                }
            }
        }
        if done {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("run did not complete in time");
}

// =============================================================================
// Parameter ingestion
// =============================================================================

/// q= plus a one-day range seeds the editor and the range, with no
/// retention dialog on any tier.
#[test]
fn e2e_launch_params_seed_editor_and_range() {
    for tier in PlanTier::all() {
        let state = state_with(
            &format!("{PARAMS_ONE_DAY}&q=some_query"),
            *tier,
        );
        assert_eq!(state.query.text, "some_query");
        assert_eq!(state.range.start.to_rfc3339(), "2026-08-01T00:00:00+00:00");
        assert_eq!(state.range.end.to_rfc3339(), "2026-08-02T00:00:00+00:00");
        assert!(
            state.retention_prompt.is_none(),
            "a one-day range must not block {tier}"
        );
    }
}

#[test]
fn e2e_malformed_params_fall_back_to_defaults() {
    let state = state_with("type=mainframe&q=ok&its=not-a-time&ite=also-bad", PlanTier::Pro);
    assert_eq!(state.query.text, "ok");
    // Unknown source and bad instants degrade to the defaults.
    assert_eq!(state.source, loglens::core::model::LogSource::Api);
    assert_eq!(
        state.range.end - state.range.start,
        chrono::Duration::hours(1)
    );
}

// =============================================================================
// Run paths
// =============================================================================

/// Button and chord triggers run the same path and render the same
/// result set.
#[test]
fn e2e_button_and_chord_runs_are_identical() {
    let backend = fixture_backend();

    let mut via_button = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    via_button.query.text = "rest/v1/projects".to_string();
    via_button.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut via_button, &mut manager, &backend);

    let mut via_chord = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    via_chord.query.text = "rest/v1/projects".to_string();
    via_chord.begin_run(RunTrigger::Chord);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut via_chord, &mut manager, &backend);

    let a = via_button.results.expect("button run must produce results");
    let b = via_chord.results.expect("chord run must produce results");
    assert_eq!(a.columns, b.columns);
    assert_eq!(a.rows, b.rows);
    assert_eq!(a.rows.len(), 3);
}

#[test]
fn e2e_results_are_newest_first_with_timestamp_column_first() {
    let backend = fixture_backend();
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    state.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut state, &mut manager, &backend);

    let results = state.results.as_ref().unwrap();
    assert_eq!(results.columns[0], "timestamp");
    assert_eq!(results.rows.len(), 5);
    assert_eq!(
        results.rows[0]["timestamp"].as_str().unwrap(),
        "2026-08-01T09:20:00Z"
    );
    assert!(state.status_message.contains("5 row(s)"));
}

#[test]
fn e2e_rerunning_identical_text_is_allowed() {
    let backend = fixture_backend();
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    state.query.text = "projects".to_string();

    for _ in 0..2 {
        state.begin_run(RunTrigger::Button);
        let mut manager = QueryManager::new();
        complete_pending_run(&mut state, &mut manager, &backend);
        assert_eq!(state.results.as_ref().unwrap().rows.len(), 3);
        assert_eq!(state.query.last_run_text.as_deref(), Some("projects"));
    }
}

#[test]
fn e2e_failed_run_preserves_editor_contents() {
    let backend: Arc<dyn QueryBackend> =
        Arc::new(LocalBackend::new(PathBuf::from("/nonexistent/loglens-e2e")).unwrap());
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    state.query.text = "keep me".to_string();
    state.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut state, &mut manager, &backend);

    assert_eq!(state.query.text, "keep me");
    assert!(state.status_message.starts_with("Query failed:"));
    assert!(state.results.is_none());
}

// =============================================================================
// Selection and the detail panel
// =============================================================================

#[test]
fn e2e_row_click_opens_detail_only_in_filtered_mode() {
    let backend = fixture_backend();
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    state.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut state, &mut manager, &backend);

    state.handle(UiEvent::RowClicked(0));
    assert!(state.detail_visible());
    let row = state.selected_row().unwrap();
    assert_eq!(
        row["metadata"]["request"]["cf"]["asOrganization"]
            .as_str()
            .unwrap(),
        "ExampleNet"
    );

    // Same rows, raw mode: clicking opens nothing.
    state.set_mode(QueryMode::RawSql);
    state.handle(UiEvent::RowClicked(0));
    assert!(!state.detail_visible());
}

#[test]
fn e2e_editing_query_closes_panel_before_next_run_completes() {
    let backend = fixture_backend();
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    state.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut state, &mut manager, &backend);

    state.handle(UiEvent::RowClicked(1));
    assert!(state.detail_visible());

    // Typing closes the panel immediately...
    state.query.text.push_str(" something");
    state.handle(UiEvent::QueryEdited);
    assert!(!state.detail_visible());

    // ...and it stays closed through the next run.
    state.begin_run(RunTrigger::Button);
    assert!(state.take_run_request().is_some());
    assert!(!state.detail_visible());
}

// =============================================================================
// Chronological paging
// =============================================================================

#[test]
fn e2e_load_older_appends_previous_evening_rows() {
    let backend = fixture_backend();
    // Two-day range spanning both fixture files; Pro allows it.
    let mut state = state_with(
        "type=api&its=2026-07-31T00:00:00Z&ite=2026-08-02T00:00:00Z",
        PlanTier::Pro,
    );
    state.row_limit = 5;
    state.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut state, &mut manager, &backend);

    // First page: the 5 newest rows (all from edge.ndjson).
    assert_eq!(state.results.as_ref().unwrap().rows.len(), 5);

    state.request_load_older = true;
    complete_pending_run(&mut state, &mut manager, &backend);

    // Second page: the two parseable rotated rows from 31 July.
    let results = state.results.as_ref().unwrap();
    assert_eq!(results.rows.len(), 7);
    assert_eq!(
        results.oldest_timestamp().unwrap().to_rfc3339(),
        "2026-07-31T22:00:00+00:00"
    );
    // The rotated file's junk line surfaced as a warning, not a failure.
    assert!(state.warnings.iter().any(|w| w.contains("malformed")));
}

#[test]
fn e2e_load_older_is_unavailable_in_raw_mode() {
    let backend = fixture_backend();
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    state.begin_run(RunTrigger::Button);
    let mut manager = QueryManager::new();
    complete_pending_run(&mut state, &mut manager, &backend);

    state.set_mode(QueryMode::RawSql);
    state.request_load_older = true;
    assert!(state.take_load_older_request().is_none());
}

// =============================================================================
// Retention guard
// =============================================================================

#[test]
fn e2e_last_3_days_quick_pick_blocks_free_tier_only() {
    for tier in PlanTier::all() {
        let mut state = state_with("type=api", *tier);
        state.apply_quick_range(QuickRange::Last3Days, test_now());
        assert_eq!(
            state.retention_prompt.is_some(),
            *tier == PlanTier::Free,
            "unexpected dialog state for {tier}"
        );
    }
}

#[test]
fn e2e_five_month_deep_link_blocks_every_tier() {
    for tier in PlanTier::all() {
        let state = state_with(
            "type=api&q=some_query&its=2026-03-02T00:00:00Z&ite=2026-08-02T00:00:00Z",
            *tier,
        );
        assert!(
            state.retention_prompt.is_some(),
            "a 5-month range must block {tier}"
        );
    }
}

#[test]
fn e2e_blocked_range_blocks_the_run_until_dismissed() {
    let mut state = state_with("type=api", PlanTier::Free);
    state.apply_quick_range(QuickRange::Last3Days, test_now());
    assert!(state.retention_prompt.is_some());

    // The pending run is swallowed while the dialog is up.
    state.begin_run(RunTrigger::Button);
    assert!(state.take_run_request().is_none());

    // Dismissing clamps the range to the allowance; the next run goes
    // through.
    state.dismiss_retention_prompt();
    assert_eq!(
        state.range.end - state.range.start,
        chrono::Duration::days(1)
    );
    state.begin_run(RunTrigger::Button);
    assert!(state.take_run_request().is_some());
}

// =============================================================================
// Supersede semantics
// =============================================================================

/// A second run started before the first completes wins the display:
/// stale messages never reach the state.
#[test]
fn e2e_new_run_supersedes_pending_one() {
    let backend = fixture_backend();
    let mut state = state_with(PARAMS_ONE_DAY, PlanTier::Pro);
    let mut manager = QueryManager::new();

    // First run: submitted but never polled to completion.
    state.query.text = "projects".to_string();
    state.begin_run(RunTrigger::Button);
    let first = state.take_run_request().unwrap();
    manager.start_run(first, Arc::clone(&backend));

    // Second run supersedes it immediately.
    state.query.text = "token".to_string();
    state.begin_run(RunTrigger::Button);
    complete_pending_run(&mut state, &mut manager, &backend);

    let results = state.results.as_ref().unwrap();
    assert_eq!(results.rows.len(), 1);
    assert!(results.rows[0]["event_message"]
        .as_str()
        .unwrap()
        .contains("token"));

    // Any late first-run messages are dropped by the manager.
    std::thread::sleep(Duration::from_millis(100));
    assert!(manager.poll_progress(100).is_empty());
}

// =============================================================================
// Saved queries
// =============================================================================

#[test]
fn e2e_saved_query_round_trip_through_disk() {
    let tmp = tempfile::tempdir().unwrap();

    let mut state = state_with("type=auth", PlanTier::Pro);
    state.saved = SavedQueryStore::load(tmp.path());
    state.query.text = "login_method".to_string();
    state
        .saved
        .add(
            "logins",
            &state.query.text,
            state.source,
            test_now(),
        )
        .unwrap();

    let reloaded = SavedQueryStore::load(tmp.path());
    assert_eq!(reloaded.queries.len(), 1);
    assert_eq!(reloaded.queries[0].name, "logins");
    assert_eq!(reloaded.queries[0].text, "login_method");
    assert_eq!(
        reloaded.queries[0].source,
        loglens::core::model::LogSource::Auth
    );
}
