use crate::config::{CommandSpec, PollConfig};
use crate::process::{LineRead, ProcessHandle, ProcessLauncher};
use crate::sink::ConsoleSink;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Canonical readiness marker emitted by the platform once every service
/// reports healthy. Matching is by containment, so decorated variants of
/// the phrase match as well.
pub const READY_MARKER: &str = "All services are healthy";

/// Terminal outcome of one poll session
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The marker appeared in the child's output
    Ready,
    /// The time budget elapsed without the marker; the child is left
    /// running so the caller can inspect it
    TimedOut,
    /// Cancellation was requested during polling
    Interrupted,
    /// The child could not be spawned, or exited before the marker
    Failed(String),
}

/// Readiness Poller: spawns a command and watches its merged output for a
/// readiness marker within a bounded wall-clock budget.
///
/// Every observed line is forwarded to the sink in arrival order before
/// the poll completes. The poller never touches the child itself; the
/// caller decides its fate from the outcome (detach on `Ready` and
/// `TimedOut`, terminate on `Interrupted`).
pub struct ReadinessPoller {
    config: PollConfig,
    cancellation_token: CancellationToken,
}

impl ReadinessPoller {
    pub fn new(config: PollConfig, cancellation_token: CancellationToken) -> Self {
        Self {
            config,
            cancellation_token,
        }
    }

    /// Spawn `spec` through `launcher` and poll its output for the marker.
    ///
    /// A spawn failure yields `Failed` immediately, without entering the
    /// poll loop. Otherwise the handle is returned alongside the outcome
    /// so the caller can inspect, detach, or terminate the child.
    pub async fn run(
        &self,
        launcher: &dyn ProcessLauncher,
        spec: &CommandSpec,
        sink: &ConsoleSink,
    ) -> (PollOutcome, Option<Box<dyn ProcessHandle>>) {
        let mut handle = match launcher.spawn(spec).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Failed to spawn {}: {}", spec.display(), e);
                return (PollOutcome::Failed(e.to_string()), None);
            }
        };

        let outcome = self.watch(handle.as_mut(), sink).await;
        (outcome, Some(handle))
    }

    /// Poll an already-spawned process for the readiness marker
    pub async fn watch(&self, handle: &mut dyn ProcessHandle, sink: &ConsoleSink) -> PollOutcome {
        let deadline = Instant::now() + self.config.timeout();
        info!(
            "Watching {} for readiness marker {:?} (timeout: {}s)",
            handle.command(),
            self.config.marker,
            self.config.timeout_secs
        );

        loop {
            if self.cancellation_token.is_cancelled() {
                return PollOutcome::Interrupted;
            }

            if Instant::now() >= deadline {
                // The child stays running so the user can inspect it.
                return PollOutcome::TimedOut;
            }

            match handle.try_next_line().await {
                LineRead::Line(line) => {
                    sink.write_line(&line).await;
                    if line.contains(&self.config.marker) {
                        debug!("Readiness marker observed");
                        return PollOutcome::Ready;
                    }
                }
                LineRead::Pending => {
                    tokio::select! {
                        _ = self.cancellation_token.cancelled() => {
                            return PollOutcome::Interrupted;
                        }
                        _ = tokio::time::sleep(self.config.interval()) => {}
                    }
                }
                LineRead::Eof => {
                    return PollOutcome::Failed(
                        "process exited before signaling readiness".to_string(),
                    );
                }
            }
        }
    }
}
