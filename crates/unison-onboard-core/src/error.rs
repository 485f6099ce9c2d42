use thiserror::Error;

/// Core error types for onboarding operations
#[derive(Error, Debug)]
pub enum OnboardError {
    #[error("Prerequisites not met: {0}")]
    PrerequisitesUnmet(String),

    #[error("Repository setup failed: {0}")]
    CloneFailed(String),

    #[error("Failed to spawn process: {0}")]
    SpawnFailed(String),

    #[error("Setup interrupted")]
    Interrupted,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl OnboardError {
    /// Check if this error aborts the onboarding session
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OnboardError::PrerequisitesUnmet(_) | OnboardError::CloneFailed(_)
        )
    }

    /// Process exit code for this error. Unmet prerequisites and a failed
    /// repository setup exit 1; everything else is surfaced as a warning
    /// and exits 0.
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { 1 } else { 0 }
    }
}
