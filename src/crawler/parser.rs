use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::crawler::models::{FloorPlan, CONTACT_FOR_AVAILABILITY};

/// Delimiter used when flattening a candidate element's text nodes.
const FIELD_DELIMITER: &str = " | ";

/// Candidates considered per pass; bounds cost on pathological pages.
const MAX_CANDIDATES: usize = 20;

/// Class-attribute substrings that mark an element as a likely listing row.
const CLASS_HINTS: [&str; 4] = ["floorplan", "floor-plan", "plan", "unit"];

/// Structural page chrome; any of these in a block disqualifies it.
const NOISE_TOKENS: [&str; 4] = ["navigation", "menu", "header", "footer"];

/// Bedroom-count vocabulary as it appears in the type column.
const BEDROOM_TOKENS: [&str; 4] = ["Studio", "1", "2", "3"];

/// Extract the canonical listing set from the raw markup of the listing
/// region: discover candidates, normalize each, dedup, sort by rent.
pub fn extract_listings(html: &str) -> Vec<FloorPlan> {
    let blocks = candidate_blocks(html);

    let mut plans: Vec<FloorPlan> = Vec::new();
    let mut seen = HashSet::new();
    for text in blocks.iter().take(MAX_CANDIDATES) {
        let Some(plan) = normalize_candidate(text) else {
            continue;
        };
        let key = format!("{}-{}-{}", plan.name, plan.sqft, plan.rent);
        if seen.insert(key) {
            plans.push(plan);
        }
    }

    // Coarser second pass catches rows that differ only in sqft formatting.
    let mut unique: Vec<FloorPlan> = Vec::new();
    let mut seen_keys = HashSet::new();
    for plan in plans {
        let key = format!("{}-{}", plan.name, plan.rent);
        if seen_keys.insert(key) {
            unique.push(plan);
        }
    }

    unique.sort_by_key(|p| p.rent_value().unwrap_or(0));
    unique
}

/// Discovery heuristic: markup in, flattened candidate text blocks out.
/// Three tiers, the first that matches anything wins. This is a guess about
/// markup this system does not own; tune it here, not downstream.
fn candidate_blocks(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    // Tier 1: elements whose class attribute hints at a listing row.
    let class_carrying = Selector::parse("div[class], tr[class]").unwrap();
    let hinted: Vec<String> = fragment
        .select(&class_carrying)
        .filter(|el| {
            el.value().attr("class").is_some_and(|class| {
                let class = class.to_lowercase();
                CLASS_HINTS.iter().any(|hint| class.contains(hint))
            })
        })
        .map(flatten_text)
        .collect();
    if !hinted.is_empty() {
        return hinted;
    }

    // Tier 2: table rows, minus the assumed header row.
    let rows = Selector::parse("tr").unwrap();
    let body_rows: Vec<String> = fragment.select(&rows).skip(1).map(flatten_text).collect();
    if !body_rows.is_empty() {
        return body_rows;
    }

    // Tier 3: generic containers with text-bearing children.
    let containers = Selector::parse("div").unwrap();
    let text_children = Selector::parse("span, p, div").unwrap();
    fragment
        .select(&containers)
        .filter(|el| el.select(&text_children).next().is_some())
        .map(flatten_text)
        .filter(|text| text.chars().count() > 10)
        .collect()
}

/// Join an element's non-empty text nodes with the field delimiter.
fn flatten_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER)
}

/// Turn one flattened candidate block into a canonical record, or reject it
/// as page noise. Rejection is silent; a malformed row never aborts a batch.
pub fn normalize_candidate(text: &str) -> Option<FloorPlan> {
    if text.chars().count() < 10 {
        return None;
    }
    let lower = text.to_lowercase();
    if NOISE_TOKENS.iter().any(|t| lower.contains(t)) {
        return None;
    }
    // Rent presence is the gate between a listing and arbitrary page text.
    if !text.contains('$') {
        return None;
    }

    let parts: Vec<&str> = text.split(FIELD_DELIMITER).map(str::trim).collect();
    if parts.len() < 6 {
        return None;
    }

    let name = parts[0];
    if name.chars().count() < 2
        || name.chars().all(|c| c.is_ascii_digit())
        || BEDROOM_TOKENS.contains(&name)
    {
        // Name column misaligned; not a real listing row.
        return None;
    }

    let type_token = parts[1];
    let mut bedrooms = if BEDROOM_TOKENS.contains(&type_token) {
        type_token.to_string()
    } else {
        String::new()
    };
    let mut bathrooms = if is_decimal(parts[2]) {
        parts[2].to_string()
    } else {
        "1".to_string()
    };
    let sqft = if !parts[3].is_empty() && parts[3].chars().all(|c| c.is_ascii_digit()) {
        parts[3].to_string()
    } else {
        String::new()
    };
    let rent = parts.iter().find(|p| p.contains('$'))?.to_string();

    let last = *parts.last()?;
    let availability = if parts.len() > 6 && !last.to_lowercase().contains("contact") {
        last.to_string()
    } else {
        CONTACT_FOR_AVAILABILITY.to_string()
    };

    match type_token {
        "Studio" => {
            bedrooms = "Studio".to_string();
            bathrooms = "1".to_string();
        }
        "1" => {
            bedrooms = "1 BR".to_string();
            bathrooms = "1 BA".to_string();
        }
        _ => {}
    }

    Some(FloorPlan {
        name: name.to_string(),
        bedrooms,
        bathrooms,
        sqft,
        rent,
        availability,
        raw_text: text.to_string(),
    })
}

/// Digits with at most one decimal point.
fn is_decimal(s: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in s.chars() {
        match c {
            '.' => dots += 1,
            c if c.is_ascii_digit() => digits += 1,
            _ => return false,
        }
    }
    dots <= 1 && digits > 0
}
