use chrono::Local;
use tracing::{error, info, warn};

use super::diff::{self, ChangeReport};
use crate::config::Config;
use crate::crawler::{self, models::FloorPlan};
use crate::notify::DiscordNotifier;
use crate::report::{self, ReportDetail};
use crate::storage::snapshot::SnapshotStore;

/// One monitoring run: load the prior snapshot, extract the current listing
/// set, classify the difference, persist, report, notify.
pub struct MonitorService {
    cfg: Config,
    store: SnapshotStore,
    notifier: Option<DiscordNotifier>,
}

pub struct MonitorOutcome {
    pub floor_plans: Vec<FloorPlan>,
    pub changes: ChangeReport,
}

impl MonitorService {
    pub fn new(cfg: Config) -> Self {
        let store = SnapshotStore::new(&cfg.results_file);
        let notifier = cfg
            .discord
            .as_ref()
            .map(|discord| DiscordNotifier::new(discord, &cfg.property_name));
        if notifier.is_none() {
            info!("DISCORD_TOKEN not set; notifications disabled");
        }
        Self {
            cfg,
            store,
            notifier,
        }
    }

    pub async fn run(&self, detail: ReportDetail) -> anyhow::Result<MonitorOutcome> {
        info!(url = %self.cfg.target_url, "Starting floor plan check");

        let previous = self.store.load().await;
        let floor_plans = crawler::extract_floor_plans(&self.cfg).await;

        if floor_plans.is_empty() {
            // Extraction failed or nothing matched; leave the snapshot as
            // the baseline for the next run.
            warn!("No floor plans extracted");
            return Ok(MonitorOutcome {
                floor_plans,
                changes: ChangeReport::default(),
            });
        }

        let changes = diff::classify(previous.as_ref(), &floor_plans);
        if changes.availability_opened {
            info!("Availability opened on a previously waitlisted plan");
        } else if changes.has_changes {
            info!("Changes detected");
        } else {
            info!("No changes detected");
        }

        // Persist before notifying: a failed notification must not cost the
        // next run its baseline.
        if let Err(e) = self.store.save(&floor_plans).await {
            error!(path = %self.cfg.results_file, error = %e, "Failed to save snapshot");
        }

        let document =
            report::render_document(&floor_plans, detail, &self.cfg.property_name, Local::now());
        match report::write_report(&self.cfg.report_file, &document).await {
            Ok(()) => info!(path = %self.cfg.report_file, "Report written"),
            Err(e) => {
                error!(path = %self.cfg.report_file, error = %e, "Failed to write report")
            }
        }

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.send_update(&floor_plans, changes, detail).await {
                error!(error = %e, "Failed to send Discord notification");
            }
        }

        Ok(MonitorOutcome {
            floor_plans,
            changes,
        })
    }
}
