use crate::prompt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;
use unison_onboard_core::{ConsoleSink, OnboardError};

/// What to do about the checkout directory
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutPlan {
    /// Directory exists and the user keeps it
    Reuse,
    /// Directory exists and is removed before cloning
    FreshClone,
    /// Directory does not exist yet
    Clone,
}

/// Decide how to obtain the checkout, asking when a directory is already
/// present (default: keep it)
pub fn resolve_checkout_plan(
    exists: bool,
    confirm: impl FnOnce(&str) -> anyhow::Result<bool>,
) -> anyhow::Result<CheckoutPlan> {
    if !exists {
        return Ok(CheckoutPlan::Clone);
    }

    if confirm("Would you like to remove it and clone fresh?")? {
        Ok(CheckoutPlan::FreshClone)
    } else {
        Ok(CheckoutPlan::Reuse)
    }
}

/// Obtains the platform repository
pub struct RepoCloner {
    repo_url: String,
    checkout_dir: PathBuf,
}

impl RepoCloner {
    pub fn new(repo_url: impl Into<String>, checkout_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_url: repo_url.into(),
            checkout_dir: checkout_dir.into(),
        }
    }

    pub async fn run(&self, sink: &ConsoleSink) -> Result<(), OnboardError> {
        sink.write_line("\n📥 Getting the platform sources...").await;

        let exists = self.checkout_dir.exists();
        if exists {
            sink.write_line(&format!(
                "📁 {} directory already exists",
                self.checkout_dir.display()
            ))
            .await;
        }

        match resolve_checkout_plan(exists, |message| prompt::confirm(message, false))? {
            CheckoutPlan::Reuse => {
                sink.write_line(&format!(
                    "Using existing {} directory",
                    self.checkout_dir.display()
                ))
                .await;
                return Ok(());
            }
            CheckoutPlan::FreshClone => {
                info!("Removing existing checkout at {:?}", self.checkout_dir);
                tokio::fs::remove_dir_all(&self.checkout_dir)
                    .await
                    .map_err(|e| {
                        OnboardError::CloneFailed(format!(
                            "failed to remove existing checkout: {e}"
                        ))
                    })?;
            }
            CheckoutPlan::Clone => {}
        }

        self.clone_repository(sink).await
    }

    async fn clone_repository(&self, sink: &ConsoleSink) -> Result<(), OnboardError> {
        let output = Command::new("git")
            .arg("clone")
            .arg(&self.repo_url)
            .arg(&self.checkout_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| OnboardError::CloneFailed(format!("failed to run git: {e}")))?;

        if output.status.success() {
            sink.write_line("✅ Repository cloned successfully").await;
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(OnboardError::CloneFailed(stderr.trim().to_string()))
        }
    }
}
