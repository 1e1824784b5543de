use tracing::{error, info};

use crate::config::Config;

mod fetcher;
pub mod models;
mod parser;

use self::models::FloorPlan;

/// Fetch the listing region and extract the canonical listing set.
///
/// Page-level failures (timeout, missing region, no candidates in any
/// discovery tier) are logged and degrade to an empty set; an empty result
/// means "extraction failed", not "zero listings confirmed".
pub async fn extract_floor_plans(cfg: &Config) -> Vec<FloorPlan> {
    let client = fetcher::build_client(cfg.request_timeout_secs);

    let markup = match fetcher::fetch_region(&client, &cfg.target_url, &cfg.target_selector).await
    {
        Ok(markup) => markup,
        Err(e) => {
            error!(url = %cfg.target_url, error = %e, "Failed to fetch listing region");
            return Vec::new();
        }
    };

    let plans = parser::extract_listings(&markup);
    if plans.is_empty() {
        error!(url = %cfg.target_url, "No listing candidates matched any discovery tier");
    } else {
        info!(count = plans.len(), "Extracted floor plans");
    }

    plans
}
