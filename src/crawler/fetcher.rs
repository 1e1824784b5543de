use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::Client;
use scraper::{Html, Selector};

pub fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent("floorwatch/0.1 (availability monitor)")
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("failed to build http client")
}

/// Fetch the page and return the inner markup of the region matched by the
/// CSS locator. Timeouts, HTTP errors and a missing region all surface as
/// errors here; the caller degrades them to an empty listing set.
pub async fn fetch_region(
    client: &Client,
    url: &str,
    selector_expr: &str,
) -> anyhow::Result<String> {
    let res = client.get(url).send().await?;
    let html = res.error_for_status()?.text().await?;

    let selector = Selector::parse(selector_expr)
        .map_err(|e| anyhow!("invalid region selector {selector_expr:?}: {e}"))?;
    let document = Html::parse_document(&html);
    let region = document
        .select(&selector)
        .next()
        .with_context(|| format!("region {selector_expr:?} not found in page"))?;

    Ok(region.inner_html())
}
