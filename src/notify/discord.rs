use anyhow::Result;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::DiscordConfig;
use crate::crawler::models::FloorPlan;
use crate::monitor::ChangeReport;
use crate::report::{self, ReportDetail};

const API_BASE: &str = "https://discord.com/api/v10";
const EMBED_COLOR: u32 = 0xff6b35;

/// Notification collaborator: posts the run outcome to Discord over the
/// REST API. Failures here are the caller's to log; persisted state is
/// already written by the time a notification is attempted.
pub struct DiscordNotifier {
    client: Client,
    cfg: DiscordConfig,
    property_name: String,
}

impl DiscordNotifier {
    pub fn new(cfg: &DiscordConfig, property_name: &str) -> Self {
        let client = Client::builder()
            .user_agent("floorwatch/0.1 (availability monitor)")
            .build()
            .expect("failed to build http client");
        Self {
            client,
            cfg: cfg.clone(),
            property_name: property_name.to_string(),
        }
    }

    pub async fn send_update(
        &self,
        floor_plans: &[FloorPlan],
        changes: ChangeReport,
        detail: ReportDetail,
    ) -> Result<()> {
        let status = if changes.availability_opened {
            "🚨 Check completed - APARTMENT AVAILABLE!"
        } else if changes.has_changes {
            "🏠 Check completed - Changes detected"
        } else {
            "✅ Check completed - No changes detected"
        };
        self.post_message(self.cfg.status_channel_id, &json!({ "content": status }))
            .await?;

        if !changes.has_changes {
            info!("No changes; sent status message only");
            return Ok(());
        }

        let summary = report::rent_summary(floor_plans);
        let table = report::render_table(floor_plans, detail);

        let pings: Vec<String> = self
            .cfg
            .ping_users
            .iter()
            .map(|id| format!("<@{id}>"))
            .collect();
        let content = if changes.availability_opened {
            format!("🚨 **APARTMENT AVAILABLE!** {}", pings.join(" "))
        } else {
            format!("🏠 **Apartment Update** {}", pings.join(" "))
        };

        let body = json!({
            "content": content.trim_end(),
            "embeds": [{
                "title": "🏠 Apartment Update Detected!",
                "description": format!("Floor plan changes found at {}", self.property_name),
                "color": EMBED_COLOR,
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "fields": [
                    {
                        "name": "📊 Summary",
                        "value": format!(
                            "**{}** plans available\n**${} - ${}** price range",
                            summary.count,
                            report::thousands(summary.min),
                            report::thousands(summary.max),
                        ),
                        "inline": false
                    },
                    {
                        "name": "📋 Current Floor Plans",
                        "value": format!("```\n{table}```"),
                        "inline": false
                    }
                ]
            }]
        });
        self.post_message(self.cfg.channel_id, &body).await?;

        info!(channel_id = self.cfg.channel_id, "Sent update notification");
        Ok(())
    }

    async fn post_message(&self, channel_id: u64, body: &serde_json::Value) -> Result<()> {
        let url = format!("{API_BASE}/channels/{channel_id}/messages");
        self.client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.cfg.token))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
