//! Unison onboarding CLI entry point.

use anyhow::Result;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unison_onboard::flow::OnboardingFlow;
use unison_onboard::platform::PlatformHostFactory;
use unison_onboard_core::{ConsoleSink, SetupConfig};

/// Upstream repository for the platform sources
const REPO_URL: &str = "https://github.com/unison-platform/unison.git";
/// Directory the repository is cloned into
const CHECKOUT_DIR: &str = "unison";
/// Address the web interface serves on once the stack is up
const WEB_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unison_onboard=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SetupConfig::builder()
        .repo_url(REPO_URL)
        .checkout_dir(PathBuf::from(CHECKOUT_DIR))
        .start_command("make")
        .start_args(["up"])
        .web_url(WEB_URL)
        .build()?;
    config.poll.validate()?;

    // Ctrl-C cancels the shared token; the poll loop observes it between
    // read attempts.
    let cancellation_token = CancellationToken::new();
    let interrupt_token = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received");
            interrupt_token.cancel();
        }
    });

    let flow = OnboardingFlow::new(
        config,
        ConsoleSink::stdout(),
        PlatformHostFactory::create_host(),
        cancellation_token,
    );

    let outcome = flow.run().await?;
    std::process::exit(outcome.exit_code());
}
