use async_trait::async_trait;
use tracing::{info, warn};
use unison_onboard_core::{CommandSpec, HostPlatform, ProcessHandle, TerminationOutcome};

/// Windows host services: browser opening through the shell and forcible
/// child termination. Windows has no graceful signal, so termination goes
/// straight through the handle.
pub struct WindowsHost;

impl WindowsHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostPlatform for WindowsHost {
    fn browser_command(&self, url: &str) -> CommandSpec {
        // `start` is a shell builtin; the empty string is the window
        // title slot.
        CommandSpec::new("cmd").args(["/C", "start", "", url])
    }

    async fn terminate(&self, handle: &mut dyn ProcessHandle) -> TerminationOutcome {
        if handle.pid().is_none() {
            return TerminationOutcome::ProcessNotFound;
        }

        match handle.kill().await {
            Ok(()) => {
                info!("Terminated child process");
                TerminationOutcome::Success
            }
            Err(e) => {
                warn!("Failed to terminate child process: {}", e);
                TerminationOutcome::Failed(format!("kill failed: {e}"))
            }
        }
    }

    fn name(&self) -> &'static str {
        "windows"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use unison_onboard_core::{LineRead, ProcessId, ProcessStatus};

    struct ExitedHandle;

    #[async_trait]
    impl ProcessHandle for ExitedHandle {
        fn pid(&self) -> Option<ProcessId> {
            None
        }

        fn command(&self) -> &str {
            "exited"
        }

        async fn try_next_line(&mut self) -> LineRead {
            LineRead::Eof
        }

        async fn try_status(&mut self) -> Result<ProcessStatus> {
            Err(anyhow::anyhow!("process already reaped"))
        }

        async fn kill(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_browser_command() {
        let spec = WindowsHost::new().browser_command("http://localhost:3000");
        assert_eq!(spec.command, "cmd");
        assert_eq!(
            spec.args,
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                "http://localhost:3000".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_terminate_without_pid_reports_not_found() {
        let mut handle = ExitedHandle;
        let outcome = WindowsHost::new().terminate(&mut handle).await;
        assert_eq!(outcome, TerminationOutcome::ProcessNotFound);
    }
}
