use crate::browser::BrowserOpener;
use crate::clone::RepoCloner;
use crate::launcher::TokioLauncher;
use crate::prereq::{self, CommandProbe, PrerequisiteChecker};
use crate::{prompt, text};
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use unison_onboard_core::{
    ConsoleSink, HostPlatform, OnboardError, PollOutcome, ReadinessPoller, SetupConfig,
};

/// Terminal result of one onboarding session
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Every step succeeded, including startup readiness
    Completed,
    /// Startup did not reach readiness, but onboarding finished
    CompletedWithWarnings,
    /// The user interrupted the session; the child was cleaned up
    Interrupted,
    /// A fatal step failed (prerequisites or repository setup)
    Aborted(String),
}

impl FlowOutcome {
    /// Exit code policy: only unmet prerequisites and a failed repository
    /// setup are fatal
    pub fn exit_code(&self) -> i32 {
        match self {
            FlowOutcome::Aborted(_) => 1,
            _ => 0,
        }
    }
}

/// Drives the full onboarding session from banner to completion text
pub struct OnboardingFlow {
    config: SetupConfig,
    sink: ConsoleSink,
    host: Box<dyn HostPlatform>,
    cancellation_token: CancellationToken,
}

impl OnboardingFlow {
    pub fn new(
        config: SetupConfig,
        sink: ConsoleSink,
        host: Box<dyn HostPlatform>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            sink,
            host,
            cancellation_token,
        }
    }

    pub async fn run(&self) -> Result<FlowOutcome> {
        self.sink.print(text::BANNER).await;

        if !self.ensure_prerequisites().await? {
            self.sink
                .write_line(
                    "❌ Prerequisites not met. Please install Docker, Docker Compose, and Git.",
                )
                .await;
            return Ok(FlowOutcome::Aborted("prerequisites not met".to_string()));
        }

        if let Err(e) = self.obtain_repository().await {
            self.sink
                .write_line(&format!("❌ Failed to set up repository: {e}"))
                .await;
            return Ok(FlowOutcome::Aborted(e.to_string()));
        }

        let startup = self.start_platform().await;
        if startup == PollOutcome::Interrupted {
            self.sink.write_line("\n⚠️ Startup interrupted by user").await;
            return Ok(FlowOutcome::Interrupted);
        }

        self.open_browser().await;

        self.sink.print(text::FIRST_STEPS).await;
        self.sink.print(text::TROUBLESHOOTING).await;
        self.sink.print(text::COMPLETION).await;

        match startup {
            PollOutcome::Ready => Ok(FlowOutcome::Completed),
            _ => Ok(FlowOutcome::CompletedWithWarnings),
        }
    }

    /// Probe the required tools; on a miss, show install guidance, wait,
    /// and probe once more
    async fn ensure_prerequisites(&self) -> Result<bool> {
        let probe = CommandProbe;
        let checker = PrerequisiteChecker::new(&probe);

        let statuses = checker.check(&self.sink).await;
        if prereq::all_installed(&statuses) {
            return Ok(true);
        }

        self.sink.print(text::INSTALL_GUIDANCE).await;
        prompt::pause("Press Enter after you've installed these tools...")?;

        let statuses = checker.check(&self.sink).await;
        Ok(prereq::all_installed(&statuses))
    }

    async fn obtain_repository(&self) -> Result<(), OnboardError> {
        let cloner = RepoCloner::new(
            self.config.repo_url.as_str(),
            self.config.checkout_dir.clone(),
        );
        cloner.run(&self.sink).await
    }

    /// Start the service stack and watch for the readiness marker. The
    /// child's fate follows the outcome: detached on `Ready` and
    /// `TimedOut`, terminated on `Interrupted`.
    async fn start_platform(&self) -> PollOutcome {
        self.sink.write_line("\n🚀 Starting the platform...").await;
        self.sink
            .write_line("This will take 2-3 minutes to start all services...")
            .await;

        let spec = self.config.start_spec();
        self.sink
            .write_line(&format!("Running: {}", spec.display()))
            .await;

        let launcher = TokioLauncher::new();
        let poller = ReadinessPoller::new(
            self.config.poll.clone(),
            self.cancellation_token.clone(),
        );
        let (outcome, handle) = poller.run(&launcher, &spec, &self.sink).await;

        match &outcome {
            PollOutcome::Ready => {
                self.sink.write_line("✅ The platform is ready!").await;
                // Detach: the services keep serving in the background.
                drop(handle);
            }
            PollOutcome::TimedOut => {
                warn!("Startup did not reach readiness within the budget");
                self.sink
                    .write_line("⚠️ Startup taking longer than expected...")
                    .await;
                self.print_manual_hint().await;
                // Deliberately detached: left running for inspection.
                drop(handle);
            }
            PollOutcome::Interrupted => {
                if let Some(mut handle) = handle {
                    let result = self.host.terminate(handle.as_mut()).await;
                    info!("Terminated startup process after interrupt: {:?}", result);
                }
            }
            PollOutcome::Failed(reason) => {
                self.sink
                    .write_line(&format!("❌ Error starting the platform: {reason}"))
                    .await;
                self.print_manual_hint().await;
            }
        }

        outcome
    }

    async fn print_manual_hint(&self) {
        self.sink
            .write_line("You can check the status manually:")
            .await;
        self.sink
            .write_line(&format!(
                "  cd {} && make health",
                self.config.checkout_dir.display()
            ))
            .await;
    }

    async fn open_browser(&self) {
        BrowserOpener::new(self.config.web_url.as_str(), self.host.as_ref())
            .open(&self.sink)
            .await;
    }
}
