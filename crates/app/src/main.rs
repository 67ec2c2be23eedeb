//! dictcheck binary.
//!
//! Runs every contract case against the configured dictionary endpoint and
//! exits non-zero if any of them failed.

mod settings;

use std::sync::Arc;

use anyhow::{Context, bail};
use dictcheck_application::VerifyContract;
use dictcheck_infrastructure::{ReqwestHttpClient, TestRunner};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = settings::load().context("failed to load configuration")?;

    tracing::info!(
        base_url = %settings.base_url,
        concurrent_requests = settings.concurrent_requests,
        "Starting dictcheck v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = ReqwestHttpClient::with_user_agent(&settings.user_agent)?;
    let verifier = VerifyContract::new(Arc::new(client), Arc::new(TestRunner::new()), settings)?;

    let report = verifier.run_all().await;

    for case in report.failures() {
        tracing::error!(
            case = %case.case,
            reason = case.failure_reason().unwrap_or_default(),
            "Contract violated"
        );
    }

    if !report.all_passed() {
        bail!("{} of {} contract cases failed", report.failed, report.total);
    }

    tracing::info!(total = report.total, "All contract cases passed");
    Ok(())
}
