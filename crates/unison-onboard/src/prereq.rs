use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;
use unison_onboard_core::ConsoleSink;

/// One required local tool and the version probe that detects it
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub name: &'static str,
    pub command: &'static str,
    pub args: &'static [&'static str],
}

/// The tools the platform needs before anything can start
pub const REQUIRED_TOOLS: &[Tool] = &[
    Tool {
        name: "Docker",
        command: "docker",
        args: &["--version"],
    },
    Tool {
        name: "Docker Compose",
        command: "docker-compose",
        args: &["--version"],
    },
    Tool {
        name: "Git",
        command: "git",
        args: &["--version"],
    },
];

/// Probe seam: run a version command and report whether it succeeded
#[async_trait]
pub trait ToolProbe: Send + Sync {
    async fn probe(&self, command: &str, args: &[&str]) -> bool;
}

/// Real probe: run the command and check its exit status
pub struct CommandProbe;

#[async_trait]
impl ToolProbe for CommandProbe {
    async fn probe(&self, command: &str, args: &[&str]) -> bool {
        let result = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("Probe for {} failed: {}", command, e);
                false
            }
        }
    }
}

/// Result of probing one tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStatus {
    pub name: &'static str,
    pub installed: bool,
}

/// Probes every required tool and reports per-tool status lines
pub struct PrerequisiteChecker<'a> {
    probe: &'a dyn ToolProbe,
}

impl<'a> PrerequisiteChecker<'a> {
    pub fn new(probe: &'a dyn ToolProbe) -> Self {
        Self { probe }
    }

    pub async fn check(&self, sink: &ConsoleSink) -> Vec<ToolStatus> {
        sink.write_line("🔍 Checking prerequisites...").await;

        let mut statuses = Vec::new();
        for tool in REQUIRED_TOOLS {
            let installed = self.probe.probe(tool.command, tool.args).await;
            if installed {
                sink.write_line(&format!("✅ {} is installed", tool.name))
                    .await;
            } else {
                sink.write_line(&format!("❌ {} is not installed", tool.name))
                    .await;
            }
            statuses.push(ToolStatus {
                name: tool.name,
                installed,
            });
        }
        statuses
    }
}

/// Names of the tools missing from a probe pass
pub fn missing(statuses: &[ToolStatus]) -> Vec<&'static str> {
    statuses
        .iter()
        .filter(|s| !s.installed)
        .map(|s| s.name)
        .collect()
}

pub fn all_installed(statuses: &[ToolStatus]) -> bool {
    statuses.iter().all(|s| s.installed)
}
