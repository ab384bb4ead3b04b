use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the platform instance, e.g. `https://example.social`.
    pub host: String,
    pub access_token: String,
    /// Command tag literal, without the leading `#`.
    pub delete_tag: String,
    /// Fixed local timezone reference times are normalized to.
    pub timezone: Tz,
    pub poll_interval_secs: u64,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        let host = std::env::var("MASTODON_HOST").context("MASTODON_HOST must be set")?;
        let access_token =
            std::env::var("MASTODON_ACCESS_TOKEN").context("MASTODON_ACCESS_TOKEN must be set")?;
        let delete_tag =
            std::env::var("DELETE_TAG").unwrap_or_else(|_| "deleteit".to_string());
        let timezone: Tz = std::env::var("LOCAL_TIMEZONE")
            .unwrap_or_else(|_| "Asia/Seoul".to_string())
            .parse()
            .map_err(|err| anyhow!("Invalid LOCAL_TIMEZONE: {err}"))?;
        let poll_interval_secs: u64 = match std::env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse()
                .context("POLL_INTERVAL_SECS must be an integer number of seconds")?,
            Err(_) => 60,
        };
        let page_size: u32 = match std::env::var("PAGE_SIZE") {
            Ok(raw) => raw.parse().context("PAGE_SIZE must be an integer")?,
            Err(_) => 100,
        };

        Ok(Config {
            host,
            access_token,
            delete_tag,
            timezone,
            poll_interval_secs,
            page_size,
        })
    }
}
