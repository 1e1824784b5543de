use std::env;

use anyhow::Context;

pub struct Config {
    pub target_url: String,
    pub target_selector: String,
    pub property_name: String,
    pub results_file: String,
    pub report_file: String,
    pub request_timeout_secs: u64,
    pub discord: Option<DiscordConfig>,
}

#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub channel_id: u64,
    pub status_channel_id: u64,
    pub ping_users: Vec<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            target_url: env::var("TARGET_URL").context("TARGET_URL is not set")?,
            target_selector: env::var("TARGET_SELECTOR")
                .context("TARGET_SELECTOR is not set")?,
            property_name: env::var("PROPERTY_NAME")
                .unwrap_or_else(|_| "Floor Plans".to_string()),
            results_file: env::var("RESULTS_FILE")
                .unwrap_or_else(|_| "floor_plans.json".to_string()),
            report_file: env::var("REPORT_FILE")
                .unwrap_or_else(|_| "floor_plans.md".to_string()),
            request_timeout_secs: match env::var("REQUEST_TIMEOUT_SECS") {
                Ok(v) => v.parse().context("REQUEST_TIMEOUT_SECS is not a number")?,
                Err(_) => 15,
            },
            discord: DiscordConfig::from_env()?,
        })
    }
}

impl DiscordConfig {
    /// Notifications are optional: without a token the pipeline still runs,
    /// it just skips the notify stage.
    fn from_env() -> anyhow::Result<Option<Self>> {
        let token = match env::var("DISCORD_TOKEN") {
            Ok(t) if !t.is_empty() => t,
            _ => return Ok(None),
        };

        let channel_id = env::var("DISCORD_CHANNEL_ID")
            .context("DISCORD_CHANNEL_ID is not set")?
            .parse()
            .context("DISCORD_CHANNEL_ID is not a number")?;
        let status_channel_id = env::var("STATUS_CHANNEL_ID")
            .context("STATUS_CHANNEL_ID is not set")?
            .parse()
            .context("STATUS_CHANNEL_ID is not a number")?;

        let ping_users = env::var("PING_USERS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| s.trim().parse::<u64>().ok())
            .collect();

        Ok(Some(Self {
            token,
            channel_id,
            status_channel_id,
            ping_users,
        }))
    }
}
