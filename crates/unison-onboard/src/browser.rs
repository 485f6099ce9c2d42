use anyhow::{Context, Result};
use backon::{ExponentialBuilder, Retryable};
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;
use unison_onboard_core::{ConsoleSink, HostPlatform};

/// Opens the platform web interface once it answers.
///
/// The endpoint is probed with bounded exponential backoff first so the
/// tab does not open onto a connection error; every failure here is soft
/// and falls back to printing the manual URL.
pub struct BrowserOpener<'a> {
    url: String,
    host: &'a dyn HostPlatform,
    retry: ExponentialBuilder,
}

impl<'a> BrowserOpener<'a> {
    pub fn new(url: impl Into<String>, host: &'a dyn HostPlatform) -> Self {
        Self {
            url: url.into(),
            host,
            retry: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(500))
                .with_max_delay(Duration::from_secs(4))
                .with_max_times(4),
        }
    }

    /// Override the probe backoff, for callers that cannot wait
    pub fn with_retry(mut self, retry: ExponentialBuilder) -> Self {
        self.retry = retry;
        self
    }

    pub async fn open(&self, sink: &ConsoleSink) {
        sink.write_line("\n🌐 Opening the web interface in your browser...")
            .await;

        if let Err(e) = self.probe_ui().await {
            debug!("Web UI probe failed: {}", e);
            sink.write_line(&format!(
                "⚠️ The web interface is not answering yet at {}",
                self.url
            ))
            .await;
        }

        match self.launch_browser().await {
            Ok(()) => {
                sink.write_line(&format!("✅ Browser opened to {}", self.url))
                    .await;
            }
            Err(e) => {
                debug!("Browser launch failed: {}", e);
                sink.write_line(&format!("❌ Could not open a browser: {e}"))
                    .await;
                sink.write_line(&format!("Please manually open: {}", self.url))
                    .await;
            }
        }
    }

    pub(crate) async fn probe_ui(&self) -> Result<()> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let request = || async {
            client
                .get(&self.url)
                .send()
                .await
                .map(|_| ())
                .context("request failed")
        };

        request.retry(self.retry).await
    }

    async fn launch_browser(&self) -> Result<()> {
        let spec = self.host.browser_command(&self.url);
        let status = tokio::process::Command::new(&spec.command)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .with_context(|| format!("failed to run {}", spec.command))?;

        anyhow::ensure!(status.success(), "{} exited with {}", spec.command, status);
        Ok(())
    }
}
