#[cfg(unix)]
mod unix_impl {
    use async_trait::async_trait;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid as NixPid;
    use std::time::Duration;
    use tracing::{info, warn};
    use unison_onboard_core::{CommandSpec, HostPlatform, ProcessHandle, TerminationOutcome};

    /// Unix host services: desktop browser opening and graceful
    /// termination of the startup process group.
    pub struct UnixHost;

    impl UnixHost {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for UnixHost {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HostPlatform for UnixHost {
        fn browser_command(&self, url: &str) -> CommandSpec {
            #[cfg(target_os = "macos")]
            let opener = "open";
            #[cfg(not(target_os = "macos"))]
            let opener = "xdg-open";

            CommandSpec::new(opener).arg(url)
        }

        async fn terminate(&self, handle: &mut dyn ProcessHandle) -> TerminationOutcome {
            let Some(pid) = handle.pid() else {
                return TerminationOutcome::ProcessNotFound;
            };

            // The launcher puts each child into its own process group, so
            // signalling the group reaches the whole service tree.
            let pgid = NixPid::from_raw(pid as i32);

            match signal::killpg(pgid, Signal::SIGTERM) {
                Ok(()) => {
                    info!("Sent SIGTERM to process group {}", pid);

                    // Grace period before escalating
                    tokio::time::sleep(Duration::from_millis(2_000)).await;

                    match signal::killpg(pgid, Signal::SIGKILL) {
                        Ok(()) => {
                            info!("Sent SIGKILL to process group {}", pid);
                            TerminationOutcome::Success
                        }
                        Err(nix::errno::Errno::ESRCH) => {
                            info!("Process group {} already terminated", pid);
                            TerminationOutcome::Success
                        }
                        Err(e) => {
                            warn!("Failed to send SIGKILL to process group {}: {}", pid, e);
                            TerminationOutcome::Failed(format!(
                                "SIGKILL to process group failed: {e}"
                            ))
                        }
                    }
                }
                Err(nix::errno::Errno::ESRCH) => {
                    info!("Process group {} not found (already terminated)", pid);
                    TerminationOutcome::ProcessNotFound
                }
                Err(nix::errno::Errno::EPERM) => {
                    warn!("Permission denied to terminate process group {}", pid);
                    TerminationOutcome::AccessDenied
                }
                Err(e) => {
                    warn!("Failed to send SIGTERM to process group {}: {}", pid, e);
                    TerminationOutcome::Failed(format!("SIGTERM to process group failed: {e}"))
                }
            }
        }

        fn name(&self) -> &'static str {
            "unix"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use anyhow::Result;
        use unison_onboard_core::{LineRead, ProcessId, ProcessStatus};

        struct TestHandle {
            child: tokio::process::Child,
        }

        #[async_trait]
        impl ProcessHandle for TestHandle {
            fn pid(&self) -> Option<ProcessId> {
                self.child.id()
            }

            fn command(&self) -> &str {
                "sleep 30"
            }

            async fn try_next_line(&mut self) -> LineRead {
                LineRead::Pending
            }

            async fn try_status(&mut self) -> Result<ProcessStatus> {
                match self.child.try_wait()? {
                    Some(status) => Ok(ProcessStatus::Exited(status)),
                    None => Ok(ProcessStatus::Running),
                }
            }

            async fn kill(&mut self) -> Result<()> {
                Ok(self.child.kill().await?)
            }
        }

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
            let spec = UnixHost::new().browser_command("http://localhost:3000");
            let expected = if cfg!(target_os = "macos") {
                "open"
            } else {
                "xdg-open"
            };
            assert_eq!(spec.command, expected);
            assert_eq!(spec.args, vec!["http://localhost:3000".to_string()]);
        }

        #[tokio::test]
        async fn test_terminate_without_pid_reports_not_found() {
            let mut handle = ExitedHandle;
            let outcome = UnixHost::new().terminate(&mut handle).await;
            assert_eq!(outcome, TerminationOutcome::ProcessNotFound);
        }

        #[tokio::test]
        async fn test_terminate_kills_the_process_group() {
            let mut cmd = tokio::process::Command::new("sleep");
            cmd.arg("30");
            cmd.process_group(0);
            let child = cmd.spawn().expect("spawn sleep");

            let mut handle = TestHandle { child };
            let outcome = UnixHost::new().terminate(&mut handle).await;
            assert_eq!(outcome, TerminationOutcome::Success);

            // The child is gone once the group has been signalled
            let status = handle.try_status().await.expect("status");
            assert!(matches!(status, ProcessStatus::Exited(_)));
        }
    }
}

// Re-export the Unix implementation when on Unix systems
#[cfg(unix)]
pub use unix_impl::UnixHost;

// Provide stub implementations for non-Unix systems
#[cfg(not(unix))]
pub struct UnixHost;

#[cfg(not(unix))]
impl UnixHost {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Default for UnixHost {
    fn default() -> Self {
        Self::new()
    }
}
