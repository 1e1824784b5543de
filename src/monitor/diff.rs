use std::collections::{HashMap, HashSet};

use crate::crawler::models::{FloorPlan, Snapshot};

/// Classification of the current listing set against the prior snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub has_changes: bool,
    /// A plan moved from a "contact us" placeholder to a countable number
    /// of openings. This is the urgent signal.
    pub availability_opened: bool,
}

pub fn classify(previous: Option<&Snapshot>, current: &[FloorPlan]) -> ChangeReport {
    let previous = match previous {
        Some(snapshot) => &snapshot.floor_plans,
        // First run: a change by definition, but nothing to compare against.
        None => {
            return ChangeReport {
                has_changes: true,
                availability_opened: false,
            }
        }
    };

    if previous.len() != current.len() {
        // Pairing is meaningless across a count change.
        return ChangeReport {
            has_changes: true,
            availability_opened: false,
        };
    }

    let mut report = ChangeReport::default();
    for (old, new) in pair(previous, current) {
        if old.name != new.name
            || old.bedrooms != new.bedrooms
            || old.bathrooms != new.bathrooms
            || old.sqft != new.sqft
            || old.rent != new.rent
        {
            report.has_changes = true;
        }
        if old.availability != new.availability {
            report.has_changes = true;
            if old.availability.to_lowercase().contains("contact")
                && is_open_count(&new.availability)
            {
                report.availability_opened = true;
            }
        }
    }
    report
}

/// Pair listings by plan name when names form a stable key on both sides;
/// fall back to positional pairing otherwise. Keyed pairing keeps a pure
/// reorder of an unchanged set from reading as a change.
fn pair<'a>(
    previous: &'a [FloorPlan],
    current: &'a [FloorPlan],
) -> Vec<(&'a FloorPlan, &'a FloorPlan)> {
    let mut by_name: HashMap<&str, &FloorPlan> = HashMap::with_capacity(previous.len());
    let prev_unique = previous
        .iter()
        .all(|p| by_name.insert(p.name.as_str(), p).is_none());
    let current_names: HashSet<&str> = current.iter().map(|p| p.name.as_str()).collect();

    if prev_unique
        && current_names.len() == current.len()
        && current.iter().all(|p| by_name.contains_key(p.name.as_str()))
    {
        current
            .iter()
            .map(|new| (by_name[new.name.as_str()], new))
            .collect()
    } else {
        previous.iter().zip(current).collect()
    }
}

/// True when the value, with the word "availability" removed, is a bare
/// count ("Availability 3" -> 3 open units).
fn is_open_count(value: &str) -> bool {
    let mut lower = value.to_lowercase();
    if let Some(i) = lower.find("availability") {
        lower.replace_range(i..i + "availability".len(), "");
    }
    let stripped = lower.trim();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn plan(name: &str, rent: &str, availability: &str) -> FloorPlan {
        FloorPlan {
            name: name.to_string(),
            bedrooms: "2".to_string(),
            bathrooms: "2".to_string(),
            sqft: "980".to_string(),
            rent: rent.to_string(),
            availability: availability.to_string(),
            raw_text: format!("{name} | {rent}"),
        }
    }

    fn snapshot(plans: Vec<FloorPlan>) -> Snapshot {
        Snapshot {
            timestamp: Utc::now(),
            floor_plans: plans,
        }
    }

    #[test]
    fn first_run_is_a_change_but_never_an_opening() {
        let current = vec![plan("A", "$1,000", "Contact for availability")];
        let report = classify(None, &current);
        assert!(report.has_changes);
        assert!(!report.availability_opened);
    }

    #[test]
    fn contact_to_count_is_an_opening() {
        let prev = snapshot(vec![plan("A", "$1,000", "Contact for availability")]);
        let current = vec![plan("A", "$1,000", "Availability 2")];
        let report = classify(Some(&prev), &current);
        assert!(report.has_changes);
        assert!(report.availability_opened);
    }

    #[test]
    fn contact_to_non_numeric_text_is_only_a_change() {
        let prev = snapshot(vec![plan("A", "$1,000", "Contact for availability")]);
        let current = vec![plan("A", "$1,000", "Waitlist open")];
        let report = classify(Some(&prev), &current);
        assert!(report.has_changes);
        assert!(!report.availability_opened);
    }

    #[test]
    fn identical_sets_are_unchanged() {
        let prev = snapshot(vec![plan("A", "$1,000", "Now"), plan("B", "$1,200", "Now")]);
        let current = vec![plan("A", "$1,000", "Now"), plan("B", "$1,200", "Now")];
        assert_eq!(classify(Some(&prev), &current), ChangeReport::default());
    }

    #[test]
    fn count_change_skips_the_field_walk() {
        let prev = snapshot(vec![plan("A", "$1,000", "Contact for availability")]);
        let current = vec![
            plan("A", "$1,000", "Availability 2"),
            plan("B", "$1,200", "Now"),
        ];
        let report = classify(Some(&prev), &current);
        assert!(report.has_changes);
        assert!(!report.availability_opened);
    }

    #[test]
    fn rent_change_is_a_change_without_opening() {
        let prev = snapshot(vec![plan("A", "$1,000", "Now")]);
        let current = vec![plan("A", "$1,050", "Now")];
        let report = classify(Some(&prev), &current);
        assert!(report.has_changes);
        assert!(!report.availability_opened);
    }

    #[test]
    fn reorder_of_an_unchanged_set_is_not_a_change() {
        let prev = snapshot(vec![plan("A", "$1,000", "Now"), plan("B", "$1,200", "Now")]);
        let current = vec![plan("B", "$1,200", "Now"), plan("A", "$1,000", "Now")];
        assert_eq!(classify(Some(&prev), &current), ChangeReport::default());
    }

    #[test]
    fn duplicate_names_fall_back_to_positional_pairing() {
        let prev = snapshot(vec![plan("A", "$1,000", "Now"), plan("A", "$1,200", "Now")]);
        let current = vec![plan("A", "$1,000", "Now"), plan("A", "$1,200", "Now")];
        assert_eq!(classify(Some(&prev), &current), ChangeReport::default());
    }

    #[test]
    fn open_count_requires_a_bare_number() {
        assert!(is_open_count("Availability 3"));
        assert!(is_open_count("3"));
        assert!(!is_open_count("Availability soon"));
        assert!(!is_open_count("2 units"));
        assert!(!is_open_count(""));
    }
}
