use crate::config::CommandSpec;
use crate::error::OnboardError;
use anyhow::Result;
use async_trait::async_trait;

/// Unique identifier for a process
pub type ProcessId = u32;

/// Status of a spawned process
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessStatus {
    /// Process is currently running
    Running,
    /// Process exited with the given status
    Exited(std::process::ExitStatus),
}

/// Result of a single read attempt on the merged output stream
#[derive(Debug, Clone, PartialEq)]
pub enum LineRead {
    /// A complete line of output
    Line(String),
    /// No data available yet
    Pending,
    /// The output stream is closed; no further lines will arrive
    Eof,
}

/// Result of a termination operation
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationOutcome {
    /// Process was successfully terminated
    Success,
    /// Process was not found (already exited)
    ProcessNotFound,
    /// Permission denied (insufficient privileges)
    AccessDenied,
    /// Operation failed with specific error message
    Failed(String),
}

/// Trait representing a handle to a running external process.
///
/// The child's error stream is merged into its output stream, so
/// [`ProcessHandle::try_next_line`] observes both in arrival order.
/// Dropping a handle detaches the child: it keeps running in the
/// background.
#[async_trait]
pub trait ProcessHandle: Send + Sync {
    /// Get the process ID (None if the process has exited)
    fn pid(&self) -> Option<ProcessId>;

    /// Get the command line that started this process
    fn command(&self) -> &str;

    /// Non-blocking read of the next line from the merged output stream
    async fn try_next_line(&mut self) -> LineRead;

    /// Try to get the exit status without blocking
    async fn try_status(&mut self) -> Result<ProcessStatus>;

    /// Force-kill the process
    async fn kill(&mut self) -> Result<()>;
}

/// Trait for spawning external processes with merged output
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Spawn the command described by `spec` in its own working directory
    async fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ProcessHandle>, OnboardError>;
}

/// Host-specific services the onboarding flow depends on
#[async_trait]
pub trait HostPlatform: Send + Sync {
    /// Command that opens `url` in the default browser
    fn browser_command(&self, url: &str) -> CommandSpec;

    /// Terminate the child, gracefully where the host supports it
    async fn terminate(&self, handle: &mut dyn ProcessHandle) -> TerminationOutcome;

    /// Get the platform name for logging and debugging
    fn name(&self) -> &'static str;
}
