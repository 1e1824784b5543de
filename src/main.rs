mod config;
mod crawler;
mod monitor;
mod notify;
mod report;
mod storage;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use monitor::MonitorService;
use report::ReportDetail;

/// Monitor a rental property's floor plan listings for changes.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Show the complete table with type and bathroom columns
    #[arg(long)]
    complete: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let detail = if args.complete {
        ReportDetail::Complete
    } else {
        ReportDetail::Compact
    };

    let cfg = Config::from_env()?;
    let service = MonitorService::new(cfg);
    let outcome = service.run(detail).await?;

    if outcome.floor_plans.is_empty() {
        anyhow::bail!("no floor plans extracted");
    }

    Ok(())
}
