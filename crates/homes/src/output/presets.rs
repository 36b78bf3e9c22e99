//! Preset output formatting.

use homes_search::FilterState;
use homes_store::models::FilterPreset;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_bounds, format_price, label, truncate_id, truncate_str};

/// JSON output structure for a preset.
#[derive(Serialize)]
pub struct PresetOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub created_at: String,
    pub filters: &'a FilterState,
}

/// Summarizes the active constraints of a filter state in one line.
pub fn describe_filter(state: &FilterState, currency: &str) -> String {
    let mut parts = Vec::new();

    if !state.search_query.trim().is_empty() {
        parts.push(format!("\"{}\"", state.search_query.trim()));
    }
    if let Some(price) = format_bounds(
        state.price_min.map(|p| format_price(p, currency)),
        state.price_max.map(|p| format_price(p, currency)),
    ) {
        parts.push(price);
    }
    if !state.property_types.is_empty() {
        parts.push(
            state
                .property_types
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("/"),
        );
    }
    if let Some(beds) = state.bedrooms_min {
        parts.push(format!("{beds}+ bd"));
    }
    if let Some(baths) = state.bathrooms_min {
        parts.push(format!("{baths}+ ba"));
    }
    if let Some(sqft) = format_bounds(state.square_feet_min, state.square_feet_max) {
        parts.push(format!("{sqft} sqft"));
    }
    if !state.location.trim().is_empty() {
        parts.push(format!("in {}", state.location.trim()));
    }
    if !state.amenities.is_empty() {
        parts.push(format!(
            "with {}",
            state
                .amenities
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if parts.is_empty() {
        "(no filters)".to_string()
    } else {
        parts.join(" · ")
    }
}

/// Formats presets as JSON.
pub fn format_presets_json(
    presets: &[(FilterPreset, FilterState)],
) -> Result<String, serde_json::Error> {
    let output: Vec<PresetOutput> = presets
        .iter()
        .map(|(preset, state)| PresetOutput {
            id: &preset.id,
            name: &preset.name,
            created_at: preset.created_at.to_rfc3339(),
            filters: state,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "presets": output }))
}

/// Formats presets as a table.
pub fn format_presets_table(
    presets: &[(FilterPreset, FilterState)],
    currency: &str,
    use_colors: bool,
) -> String {
    if presets.is_empty() {
        return "No presets found.\n".to_string();
    }

    let mut output = String::new();
    let header = format!("{:<9} {:<20} {}", "ID", "Name", "Filters");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (preset, state) in presets {
        output.push_str(&format!(
            "{:<9} {:<20} {}\n",
            truncate_id(&preset.id),
            truncate_str(&preset.name, 20),
            truncate_str(&describe_filter(state, currency), 60),
        ));
    }
    output
}

/// Formats a single preset as JSON (show, save and delete commands).
pub fn format_preset_json(
    preset: &FilterPreset,
    state: &FilterState,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PresetOutput {
        id: &preset.id,
        name: &preset.name,
        created_at: preset.created_at.to_rfc3339(),
        filters: state,
    })
}

/// Formats preset details for humans.
pub fn format_preset_details_table(
    preset: &FilterPreset,
    state: &FilterState,
    currency: &str,
    use_colors: bool,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} {}\n", label("Preset:", use_colors), preset.name));
    output.push_str(&format!("ID: {}\n", preset.id));
    output.push_str(&format!("Created: {}\n", preset.created_at.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!("Filters: {}\n", describe_filter(state, currency)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use homes_search::FilterUpdate;

    #[test]
    fn test_describe_empty_filter() {
        assert_eq!(describe_filter(&FilterState::default(), "$"), "(no filters)");
    }

    #[test]
    fn test_describe_filter_lists_constraints_in_order() {
        let state = FilterState::default()
            .set_field(FilterUpdate::SearchQuery(" lake ".to_string()))
            .with_price_range(None, Some(500_000))
            .toggle_property_type("House")
            .set_field(FilterUpdate::BedroomsMin(Some(3)))
            .set_field(FilterUpdate::Location("Austin".to_string()))
            .toggle_amenity("Pool");

        assert_eq!(
            describe_filter(&state, "$"),
            "\"lake\" · up to $500,000 · House · 3+ bd · in Austin · with Pool"
        );
    }

    #[test]
    fn test_presets_table_and_json() {
        let preset = FilterPreset {
            id: "0123456789abcdef".to_string(),
            name: "Starter".to_string(),
            price_range: "-300000".to_string(),
            property_types: String::new(),
            bedrooms_min: None,
            bathrooms_min: None,
            square_feet_range: String::new(),
            location: String::new(),
            amenities: String::new(),
            search_query: String::new(),
            created_at: Utc::now(),
        };
        let state = FilterState::default().with_price_range(None, Some(300_000));
        let presets = vec![(preset, state)];

        let table = format_presets_table(&presets, "$", false);
        assert!(table.contains("01234567"));
        assert!(table.contains("up to $300,000"));

        let json = format_presets_json(&presets).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["presets"][0]["name"], "Starter");
        assert_eq!(value["presets"][0]["filters"]["price_max"], 300_000);
    }
}
