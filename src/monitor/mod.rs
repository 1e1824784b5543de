mod diff;
mod service;

pub use diff::ChangeReport;
pub use service::{MonitorOutcome, MonitorService};
