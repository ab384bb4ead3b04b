use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use status_sweeper::client::MastodonClient;
use status_sweeper::config::Config;
use status_sweeper::sweep::Sweeper;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,status_sweeper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let (client, account) = MastodonClient::connect(&config.host, &config.access_token)
        .await
        .context("Failed to verify credentials")?;
    tracing::info!("I am {}", account.username);

    let sweeper = Sweeper::new(client, &config.delete_tag, config.timezone, config.page_size);

    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    // one run must finish before the next tick fires
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracing::debug!("Start cleanup");
                match sweeper.run_once(chrono::Utc::now()).await {
                    Ok(report) => tracing::debug!(
                        deleted = report.deleted,
                        skipped = report.skipped,
                        "Cleanup finished"
                    ),
                    // the next tick retries; transient network failures
                    // are expected here
                    Err(err) => tracing::error!("Cleanup failed: {err}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
