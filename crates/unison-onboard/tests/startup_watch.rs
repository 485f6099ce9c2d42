//! End-to-end readiness watch against real child processes.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use unison_onboard::launcher::TokioLauncher;
use unison_onboard_core::{
    CommandSpec, ConsoleSink, PollConfig, PollOutcome, ProcessStatus, READY_MARKER,
    ReadinessPoller,
};

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").args(["-c", script])
}

fn poll_config(timeout_secs: u64, interval_ms: u64) -> PollConfig {
    PollConfig {
        marker: READY_MARKER.to_string(),
        timeout_secs,
        interval_ms,
    }
}

#[tokio::test]
async fn marker_in_output_reports_ready() {
    let (sink, buffer) = ConsoleSink::buffered();
    let poller = ReadinessPoller::new(poll_config(10, 50), CancellationToken::new());

    let (outcome, handle) = poller
        .run(
            &TokioLauncher::new(),
            &sh("echo 'Starting services'; echo 'All services are healthy'; sleep 5"),
            &sink,
        )
        .await;

    assert_eq!(outcome, PollOutcome::Ready);
    assert!(handle.is_some());
    assert!(buffer.contents().contains("Starting services"));
    assert!(buffer.contents().contains("All services are healthy"));
}

#[tokio::test]
async fn silent_child_times_out_and_stays_running() {
    let (sink, buffer) = ConsoleSink::buffered();
    let poller = ReadinessPoller::new(poll_config(1, 100), CancellationToken::new());

    let (outcome, handle) = poller
        .run(&TokioLauncher::new(), &sh("sleep 5"), &sink)
        .await;

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert!(buffer.contents().is_empty());

    // The child must still be running; timing out never kills it.
    let mut handle = handle.expect("handle");
    let status = handle.try_status().await.expect("status");
    assert_eq!(status, ProcessStatus::Running);

    let _ = handle.kill().await;
}

#[tokio::test]
async fn child_exit_without_marker_fails() {
    let (sink, buffer) = ConsoleSink::buffered();
    let poller = ReadinessPoller::new(poll_config(10, 50), CancellationToken::new());

    let (outcome, _handle) = poller
        .run(&TokioLauncher::new(), &sh("echo 'no marker here'"), &sink)
        .await;

    assert!(matches!(outcome, PollOutcome::Failed(_)));
    assert!(buffer.contents().contains("no marker here"));
}

#[tokio::test]
async fn missing_command_fails_without_polling() {
    let (sink, _buffer) = ConsoleSink::buffered();
    let poller = ReadinessPoller::new(poll_config(10, 50), CancellationToken::new());

    let (outcome, handle) = poller
        .run(
            &TokioLauncher::new(),
            &CommandSpec::new("unison-onboard-no-such-tool"),
            &sink,
        )
        .await;

    assert!(matches!(outcome, PollOutcome::Failed(_)));
    assert!(handle.is_none());
}

#[tokio::test]
async fn cancellation_reports_interrupted() {
    let (sink, _buffer) = ConsoleSink::buffered();
    let token = CancellationToken::new();
    let poller = ReadinessPoller::new(poll_config(30, 100), token.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        token.cancel();
    });

    let (outcome, handle) = poller
        .run(&TokioLauncher::new(), &sh("sleep 5"), &sink)
        .await;

    assert_eq!(outcome, PollOutcome::Interrupted);

    // Interrupt cleanup is the caller's job; kill the child here.
    if let Some(mut handle) = handle {
        let _ = handle.kill().await;
    }
}
