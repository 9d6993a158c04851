mod common;

use std::time::Duration;

use backend::domain::SessionStatus;
use backend::errors::domain::{DomainError, InvalidStateKind};
use backend::services::automation::AutomationStatus;

use common::{app_state, started_session};

const TICK: Duration = Duration::from_millis(5);

async fn wait_until_done(state: &backend::AppState, id: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let summary = state.flow.session_summary(id).await.unwrap();
        if summary.status == SessionStatus::Done {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "session never finished"
        );
        tokio::time::sleep(TICK).await;
    }
}

#[tokio::test]
async fn start_is_idempotent() {
    let state = app_state(100);
    started_session(&state, "g1").await;

    assert_eq!(
        state.automation.start("g1", TICK).unwrap(),
        AutomationStatus::Started
    );
    assert_eq!(
        state.automation.start("g1", TICK).unwrap(),
        AutomationStatus::AlreadyRunning
    );
    assert!(state.automation.is_running("g1"));

    state.automation.stop("g1").unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_starts_spawn_exactly_one_loop() {
    let state = app_state(1_000);
    started_session(&state, "g1").await;

    let a = state.automation.clone();
    let b = state.automation.clone();
    let (ra, rb) = tokio::join!(
        tokio::spawn(async move { a.start("g1", TICK) }),
        tokio::spawn(async move { b.start("g1", TICK) }),
    );
    let results = [ra.unwrap().unwrap(), rb.unwrap().unwrap()];
    assert_eq!(
        results
            .iter()
            .filter(|s| **s == AutomationStatus::Started)
            .count(),
        1,
        "exactly one racing start may win: {results:?}"
    );
    state.automation.stop("g1").unwrap();
}

#[tokio::test]
async fn start_on_a_missing_session_is_not_found() {
    let state = app_state(10);
    assert!(matches!(
        state.automation.start("nope", TICK).unwrap_err(),
        DomainError::NotFound(_, _)
    ));
}

#[tokio::test]
async fn loop_runs_the_session_to_completion_and_stops_itself() {
    let state = app_state(3);
    started_session(&state, "g1").await;

    state.automation.start("g1", TICK).unwrap();
    wait_until_done(&state, "g1").await;

    // The loop tears itself down once the session is done.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while state.automation.is_running("g1") {
        assert!(tokio::time::Instant::now() < deadline, "loop never exited");
        tokio::time::sleep(TICK).await;
    }
    assert!(!state
        .flow
        .session_summary("g1")
        .await
        .unwrap()
        .automation_enabled);

    // Done is terminal.
    let err = state.flow.resolve_phase("g1").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidState(InvalidStateKind::AlreadyDone, _)
    ));
}

#[tokio::test]
async fn stop_cancels_and_a_second_stop_is_an_error() {
    let state = app_state(1_000);
    started_session(&state, "g1").await;

    state.automation.start("g1", Duration::from_secs(60)).unwrap();
    state.automation.stop("g1").unwrap();
    assert!(!state.automation.is_running("g1"));

    // The loop observes the flag and exits; its map entry disappears.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        match state.automation.stop("g1") {
            Err(DomainError::InvalidState(InvalidStateKind::AutomationNotRunning, _)) => break,
            Err(e) => panic!("unexpected error: {e}"),
            Ok(()) => {
                assert!(tokio::time::Instant::now() < deadline, "entry never removed");
                tokio::time::sleep(TICK).await;
            }
        }
    }
}

#[tokio::test]
async fn stopped_session_can_be_restarted() {
    let state = app_state(1_000);
    started_session(&state, "g1").await;

    state.automation.start("g1", TICK).unwrap();
    state.automation.stop("g1").unwrap();

    // Wait for the old loop to clean up, then start again.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        match state.automation.start("g1", TICK) {
            Ok(AutomationStatus::Started) => break,
            Ok(AutomationStatus::AlreadyRunning) | Err(_) => {
                assert!(tokio::time::Instant::now() < deadline, "restart never took");
                tokio::time::sleep(TICK).await;
            }
        }
    }
    assert!(state.automation.is_running("g1"));
    state.automation.stop("g1").unwrap();
}

#[tokio::test]
async fn loop_exits_quietly_when_the_session_is_deleted() {
    let state = app_state(1_000);
    started_session(&state, "g1").await;

    state.automation.start("g1", TICK).unwrap();
    state.flow.delete_session("g1").unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while state.automation.is_running("g1") {
        assert!(tokio::time::Instant::now() < deadline, "loop never exited");
        tokio::time::sleep(TICK).await;
    }
}
