use anyhow::Result;
use chrono::{DateTime, Local};
use tokio::fs;

use crate::crawler::models::FloorPlan;

/// Which columns the rendered table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDetail {
    /// Floor Plan, Sq.Ft., Rent, Availability.
    Compact,
    /// Adds the Bed and Bath columns.
    Complete,
}

/// Rent statistics over the listing set. Listings with no parseable rent are
/// excluded from the numbers but stay in the table.
pub struct RentSummary {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub average: u64,
}

pub fn rent_summary(plans: &[FloorPlan]) -> RentSummary {
    let rents: Vec<u64> = plans.iter().filter_map(FloorPlan::rent_value).collect();
    let (min, max, average) = if rents.is_empty() {
        (0, 0, 0)
    } else {
        (
            rents.iter().copied().min().unwrap_or(0),
            rents.iter().copied().max().unwrap_or(0),
            rents.iter().sum::<u64>() / rents.len() as u64,
        )
    };
    RentSummary {
        count: plans.len(),
        min,
        max,
        average,
    }
}

const COMPACT_HEADERS: [&str; 4] = ["Floor Plan", "Sq.Ft.", "Rent", "Availability"];
const COMPACT_MIN_WIDTHS: [usize; 4] = [10, 6, 4, 12];
const COMPLETE_HEADERS: [&str; 6] = ["Floor Plan", "Bed", "Bath", "Sq.Ft.", "Rent", "Availability"];
const COMPLETE_MIN_WIDTHS: [usize; 6] = [10, 3, 4, 6, 4, 12];

/// Render the fixed-width pipe table for the listing set.
pub fn render_table(plans: &[FloorPlan], detail: ReportDetail) -> String {
    let (headers, min_widths): (&[&str], &[usize]) = match detail {
        ReportDetail::Compact => (&COMPACT_HEADERS, &COMPACT_MIN_WIDTHS),
        ReportDetail::Complete => (&COMPLETE_HEADERS, &COMPLETE_MIN_WIDTHS),
    };

    let rows: Vec<Vec<String>> = plans.iter().map(|p| display_row(p, detail)).collect();

    let mut widths: Vec<usize> = min_widths.to_vec();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut table = String::new();
    table.push_str(&format_row(headers.iter().map(|h| h.to_string()), &widths));
    table.push_str(&separator_row(&widths));
    for row in rows {
        table.push_str(&format_row(row.into_iter(), &widths));
    }
    table
}

/// Render the full report document: title, timestamp, pricing summary,
/// count, table. Deterministic for a given listing set and timestamp.
pub fn render_document(
    plans: &[FloorPlan],
    detail: ReportDetail,
    property_name: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut doc = format!("# {property_name} - Floor Plans\n\n");

    if plans.is_empty() {
        doc.push_str("No floor plans found.\n");
        return doc;
    }

    let summary = rent_summary(plans);
    doc.push_str(&format!(
        "Last updated: {}\n\n",
        generated_at.format("%B %d, %Y at %I:%M %p")
    ));
    doc.push_str(&format!(
        "Pricing range: ${} - ${} (average: ${})\n\n",
        thousands(summary.min),
        thousands(summary.max),
        thousands(summary.average)
    ));
    doc.push_str(&format!("Total plans available: {}\n\n", summary.count));
    doc.push_str(&render_table(plans, detail));
    doc
}

/// The report file is regenerated in full on every run, never appended.
pub async fn write_report(path: &str, document: &str) -> Result<()> {
    fs::write(path, document).await?;
    Ok(())
}

fn display_row(plan: &FloorPlan, detail: ReportDetail) -> Vec<String> {
    let name = escape(&plan.name);
    let sqft = if plan.sqft.is_empty() {
        "—".to_string()
    } else {
        format!("{} ft²", plan.sqft)
    };
    let rent = if plan.rent.is_empty() {
        "—".to_string()
    } else {
        escape(&plan.rent)
    };
    let availability =
        if plan.availability.is_empty() || plan.availability.to_lowercase().contains("contact") {
            "Contact for details".to_string()
        } else {
            escape(&plan.availability)
        };

    match detail {
        ReportDetail::Compact => vec![name, sqft, rent, availability],
        ReportDetail::Complete => {
            let bed = if plan.bedrooms == "Studio" {
                "Studio".to_string()
            } else if plan.bedrooms.contains('1') {
                "1 Bedroom".to_string()
            } else if plan.bedrooms.is_empty() {
                "—".to_string()
            } else {
                escape(&plan.bedrooms)
            };
            let bath = if plan.bathrooms.is_empty() {
                "—".to_string()
            } else {
                escape(&plan.bathrooms)
            };
            vec![name, bed, bath, sqft, rent, availability]
        }
    }
}

fn format_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn separator_row(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("|-{}-|\n", dashes.join("-|-"))
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// 1825 -> "1,825".
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
