use crate::poller::READY_MARKER;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration for the readiness poll loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollConfig {
    /// Substring of the child's output that signals readiness
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Maximum wall-clock wait for the marker (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay between unsuccessful read attempts (in milliseconds)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            timeout_secs: default_timeout_secs(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl PollConfig {
    /// Create a new PollConfig with the standard startup budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PollConfig with a short budget, for smoke runs
    pub fn quick() -> Self {
        Self {
            marker: default_marker(),
            timeout_secs: 5,
            interval_ms: 100,
        }
    }

    /// Validate the configuration and return errors if invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.marker.trim().is_empty() {
            return Err(anyhow::anyhow!("marker must not be empty"));
        }

        if self.interval_ms == 0 {
            return Err(anyhow::anyhow!("interval_ms must be greater than zero"));
        }

        if self.interval_ms > self.timeout_secs.saturating_mul(1_000) {
            return Err(anyhow::anyhow!(
                "interval_ms cannot be greater than the timeout"
            ));
        }

        if self.timeout_secs > 3_600 {
            return Err(anyhow::anyhow!("timeout_secs should not exceed one hour"));
        }

        Ok(())
    }

    /// Get the readiness timeout as Duration
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Get the poll interval as Duration
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }
}

/// An external command invocation: program, arguments, explicit working
/// directory, and environment overrides. The working directory always
/// travels with the command; nothing changes the process-wide directory.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub command: String,
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
    pub env: HashMap<String, String>,
}

impl CommandSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<S: ToString, I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        self.args.extend(iter.into_iter().map(|s| s.to_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Command line as a single display string, for log and status output
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Main onboarding configuration
#[derive(Default, Debug, Clone, PartialEq, Builder)]
#[builder(setter(into, strip_option))]
pub struct SetupConfig {
    pub repo_url: String,
    pub checkout_dir: PathBuf,
    pub start_command: String,
    #[builder(default)]
    #[builder(setter(custom))]
    pub start_args: Vec<String>,
    #[builder(default)]
    #[builder(setter(custom))]
    pub env: HashMap<String, String>,
    pub web_url: String,
    #[builder(default)]
    pub poll: PollConfig,
}

impl SetupConfig {
    pub fn builder() -> SetupConfigBuilder {
        SetupConfigBuilder::default()
    }

    /// The startup invocation, rooted at the checkout directory
    pub fn start_spec(&self) -> CommandSpec {
        CommandSpec {
            command: self.start_command.clone(),
            args: self.start_args.clone(),
            working_directory: Some(self.checkout_dir.clone()),
            env: self.env.clone(),
        }
    }
}

impl SetupConfigBuilder {
    pub fn start_args<S: ToString, I: IntoIterator<Item = S>>(&mut self, iter: I) -> &mut Self {
        let args: Vec<String> = iter.into_iter().map(|s| s.to_string()).collect();
        self.start_args = Some(args);
        self
    }

    pub fn env<T: ToString>(&mut self, key: T, value: T) -> &mut Self {
        let map = self.env.get_or_insert_with(HashMap::new);
        map.insert(key.to_string(), value.to_string());

        self
    }

    pub fn env_multi<T: ToString, I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) -> &mut Self {
        let env = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in iter {
            env.insert(key.to_string(), value.to_string());
        }
        self
    }
}

// Default value functions for serde
fn default_marker() -> String {
    READY_MARKER.to_string()
}
fn default_timeout_secs() -> u64 {
    300
}
fn default_interval_ms() -> u64 {
    1_000
}
