use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use unison_onboard_core::{
    CommandSpec, LineRead, OnboardError, ProcessHandle, ProcessId, ProcessLauncher, ProcessStatus,
};

/// Spawns external commands with the error stream merged into the output
/// stream: two pump tasks forward both streams line-by-line into one
/// channel, which the handle drains without blocking.
pub struct TokioLauncher;

impl TokioLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessLauncher for TokioLauncher {
    async fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ProcessHandle>, OnboardError> {
        let mut cmd = Command::new(&spec.command);
        cmd.args(&spec.args);

        // Working directory is an explicit parameter of the command;
        // nothing changes the process-wide directory.
        if let Some(dir) = &spec.working_directory {
            cmd.current_dir(dir);
        }

        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        // New process group so the whole service tree can be signalled at
        // once on interrupt.
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd
            .spawn()
            .map_err(|e| OnboardError::SpawnFailed(format!("{}: {e}", spec.display())))?;

        match child.id() {
            Some(pid) => {
                info!("Started process: {} (PID: {})", spec.display(), pid);
            }
            None => {
                warn!(
                    "Started process: {}, but PID is not available (process may have exited quickly)",
                    spec.display()
                );
            }
        }

        let lines = pump_output(&mut child);

        Ok(Box::new(TokioProcessHandle {
            child,
            lines,
            command: spec.display(),
        }))
    }
}

/// Forward stdout and stderr line-by-line into a single channel. The
/// channel disconnects once both streams reach EOF, after every buffered
/// line has been drained.
fn pump_output(child: &mut Child) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(pump_stream(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(pump_stream(stderr, tx));
    }

    rx
}

async fn pump_stream<R: AsyncRead + Unpin>(stream: R, tx: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                debug!("Output pump stopped: {}", e);
                break;
            }
        }
    }
}

/// Handle to a child spawned by [`TokioLauncher`]. Dropping it detaches
/// the child.
pub struct TokioProcessHandle {
    child: Child,
    lines: mpsc::UnboundedReceiver<String>,
    command: String,
}

#[async_trait]
impl ProcessHandle for TokioProcessHandle {
    fn pid(&self) -> Option<ProcessId> {
        self.child.id()
    }

    fn command(&self) -> &str {
        &self.command
    }

    async fn try_next_line(&mut self) -> LineRead {
        match self.lines.try_recv() {
            Ok(line) => LineRead::Line(line),
            Err(mpsc::error::TryRecvError::Empty) => LineRead::Pending,
            Err(mpsc::error::TryRecvError::Disconnected) => LineRead::Eof,
        }
    }

    async fn try_status(&mut self) -> Result<ProcessStatus> {
        match self.child.try_wait()? {
            Some(status) => Ok(ProcessStatus::Exited(status)),
            None => Ok(ProcessStatus::Running),
        }
    }

    async fn kill(&mut self) -> Result<()> {
        self.child
            .kill()
            .await
            .context("Failed to kill child process")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    async fn drain(handle: &mut Box<dyn ProcessHandle>) -> Vec<String> {
        let mut collected = Vec::new();
        loop {
            match handle.try_next_line().await {
                LineRead::Line(line) => collected.push(line),
                LineRead::Pending => tokio::time::sleep(Duration::from_millis(10)).await,
                LineRead::Eof => break,
            }
        }
        collected
    }

    #[tokio::test]
    async fn test_merges_stdout_and_stderr() {
        let launcher = TokioLauncher::new();
        let mut handle = launcher
            .spawn(&sh("echo out-line; echo err-line >&2"))
            .await
            .expect("spawn sh");

        let lines = drain(&mut handle).await;
        assert!(lines.contains(&"out-line".to_string()));
        assert!(lines.contains(&"err-line".to_string()));
    }

    #[tokio::test]
    async fn test_missing_command_is_a_spawn_failure() {
        let launcher = TokioLauncher::new();
        let result = launcher
            .spawn(&CommandSpec::new("unison-onboard-no-such-tool"))
            .await;

        assert!(matches!(result, Err(OnboardError::SpawnFailed(_))));
    }

    #[tokio::test]
    async fn test_working_directory_is_honored() {
        let launcher = TokioLauncher::new();
        let mut handle = launcher
            .spawn(&sh("pwd").current_dir("/"))
            .await
            .expect("spawn sh");

        let lines = drain(&mut handle).await;
        assert_eq!(lines, vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_environment_is_passed_through() {
        let launcher = TokioLauncher::new();
        let mut handle = launcher
            .spawn(&sh("echo \"$ONBOARD_TEST\"").env("ONBOARD_TEST", "hello"))
            .await
            .expect("spawn sh");

        let lines = drain(&mut handle).await;
        assert_eq!(lines, vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_status_reports_exit() {
        let launcher = TokioLauncher::new();
        let mut handle = launcher.spawn(&sh("true")).await.expect("spawn sh");

        for _ in 0..100 {
            if let ProcessStatus::Exited(status) = handle.try_status().await.expect("status") {
                assert!(status.success());
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("child never reported exit");
    }
}
