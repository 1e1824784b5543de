use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical floor plan availability placeholder.
pub const CONTACT_FOR_AVAILABILITY: &str = "Contact for availability";

/// One canonical floor plan record, as extracted from the listing page.
///
/// Fields are kept as display text: the page is the source of truth and the
/// diff is textual. `raw_text` retains the flattened source block for
/// debugging and as a fallback dedup input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlan {
    pub name: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub sqft: String,
    pub rent: String,
    pub availability: String,
    pub raw_text: String,
}

impl FloorPlan {
    /// Integer rent for sorting and summary statistics, obtained by
    /// stripping every non-digit character. `None` when no digit exists.
    pub fn rent_value(&self) -> Option<u64> {
        let digits: String = self.rent.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

/// Persisted result of the most recent successful extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub floor_plans: Vec<FloorPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_value_strips_non_digits() {
        let plan = FloorPlan {
            rent: "$1,825".to_string(),
            ..Default::default()
        };
        assert_eq!(plan.rent_value(), Some(1825));
    }

    #[test]
    fn rent_value_missing_when_no_digits() {
        let plan = FloorPlan {
            rent: "—".to_string(),
            ..Default::default()
        };
        assert_eq!(plan.rent_value(), None);
    }
}
