//! Tests for filter state edits and predicate compilation.

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use homes_store::models::{Coordinates, Listing};

use super::*;

// ==================== Test Helpers ====================

fn make_listing(id: &str, title: &str, price: u64, property_type: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        address: "1 Main St".to_string(),
        price,
        property_type: property_type.to_string(),
        bedrooms: 2,
        bathrooms: 1.0,
        square_feet: 1000,
        year_built: 2000,
        listed_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        images: vec![],
        features: vec![],
        coordinates: Coordinates::default(),
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ==================== Filter State Tests ====================

#[test]
fn test_default_state_is_inactive() {
    assert!(!FilterState::default().is_active());
    assert_eq!(FilterState::clear(), FilterState::default());
}

#[test]
fn test_set_field_does_not_mutate_input() {
    let original = FilterState::default();
    let next = original.set_field(FilterUpdate::PriceMin(Some(100)));

    assert_eq!(original.price_min, None);
    assert_eq!(next.price_min, Some(100));
}

#[test]
fn test_set_field_replaces_only_one_field() {
    let state = FilterState::default()
        .set_field(FilterUpdate::BedroomsMin(Some(2)))
        .set_field(FilterUpdate::Location("lake".to_string()));
    let next = state.set_field(FilterUpdate::BedroomsMin(None));

    assert_eq!(next.bedrooms_min, None);
    assert_eq!(next.location, "lake");
}

#[test]
fn test_each_field_activates_state() {
    let updates = vec![
        FilterUpdate::PriceMin(Some(1)),
        FilterUpdate::PriceMax(Some(1)),
        FilterUpdate::PropertyTypes(set(&["House"])),
        FilterUpdate::BedroomsMin(Some(1)),
        FilterUpdate::BathroomsMin(Some(1)),
        FilterUpdate::SquareFeetMin(Some(1)),
        FilterUpdate::SquareFeetMax(Some(1)),
        FilterUpdate::Location("x".to_string()),
        FilterUpdate::Amenities(set(&["Pool"])),
        FilterUpdate::SearchQuery("x".to_string()),
    ];

    for update in updates {
        let state = FilterState::default().set_field(update.clone());
        assert!(state.is_active(), "{update:?} should activate the state");
    }
}

#[test]
fn test_blank_strings_are_inactive() {
    let state = FilterState::default()
        .set_field(FilterUpdate::Location("   ".to_string()))
        .set_field(FilterUpdate::SearchQuery("\t".to_string()));
    assert!(!state.is_active());
    assert!(compile(&state).is_unconstrained());
}

#[test]
fn test_toggle_property_type_adds_and_removes() {
    let state = FilterState::default().toggle_property_type("House");
    assert_eq!(state.property_types, set(&["House"]));

    let state = state.toggle_property_type("Condo").toggle_property_type("House");
    assert_eq!(state.property_types, set(&["Condo"]));
}

#[test]
fn test_toggle_amenity_adds_and_removes() {
    let state = FilterState::default().toggle_amenity("Pool").toggle_amenity("Gym");
    assert_eq!(state.amenities, set(&["Gym", "Pool"]));
    assert_eq!(state.toggle_amenity("Pool").amenities, set(&["Gym"]));
}

#[test]
fn test_with_price_range_sets_both_bounds() {
    let state = FilterState::default()
        .with_price_range(Some(500_000), Some(1_000_000))
        .with_price_range(None, Some(500_000));
    assert_eq!(state.price_min, None);
    assert_eq!(state.price_max, Some(500_000));
}

// ==================== Compilation Tests ====================

#[test]
fn test_default_state_compiles_to_accept_all() {
    let predicate = compile(&FilterState::default());
    assert!(predicate.is_unconstrained());
    assert!(predicate.matches(&make_listing("1", "Anything", 0, "Land")));
}

#[test]
fn test_clause_order_is_fixed() {
    let state = FilterState {
        price_min: Some(1),
        property_types: set(&["House"]),
        bedrooms_min: Some(1),
        bathrooms_min: Some(1),
        square_feet_max: Some(5000),
        location: "Austin".to_string(),
        amenities: set(&["Pool"]),
        search_query: "Lake".to_string(),
        ..Default::default()
    };

    let clauses = compile(&state).clauses().to_vec();
    assert_eq!(
        clauses,
        vec![
            Clause::Text("lake".to_string()),
            Clause::Price {
                min: Some(1),
                max: None
            },
            Clause::PropertyType(set(&["House"])),
            Clause::MinBedrooms(1),
            Clause::MinBathrooms(1),
            Clause::SquareFeet {
                min: None,
                max: Some(5000)
            },
            Clause::Location("austin".to_string()),
            Clause::Amenities(set(&["Pool"])),
        ]
    );
}

// ==================== Clause Tests ====================

#[test]
fn test_text_clause_matches_any_of_three_fields() {
    let predicate = compile(&FilterState::default().set_field(FilterUpdate::SearchQuery(
        "lake".to_string(),
    )));

    let mut by_title = make_listing("1", "Lake View", 1, "House");
    by_title.address = "Elm St".to_string();
    let mut by_address = make_listing("2", "Cottage", 1, "House");
    by_address.address = "123 LAKE Street".to_string();
    let mut by_description = make_listing("3", "Cottage", 1, "House");
    by_description.description = "Steps from the lake".to_string();
    let none = make_listing("4", "Cottage", 1, "House");

    assert!(predicate.matches(&by_title));
    assert!(predicate.matches(&by_address));
    assert!(predicate.matches(&by_description));
    assert!(!predicate.matches(&none));
}

#[test]
fn test_price_bounds_are_inclusive() {
    let state = FilterState::default().with_price_range(Some(100), Some(200));
    let predicate = compile(&state);

    assert!(!predicate.matches(&make_listing("1", "a", 99, "House")));
    assert!(predicate.matches(&make_listing("2", "a", 100, "House")));
    assert!(predicate.matches(&make_listing("3", "a", 200, "House")));
    assert!(!predicate.matches(&make_listing("4", "a", 201, "House")));
}

#[test]
fn test_open_price_bound() {
    let predicate = compile(&FilterState::default().set_field(FilterUpdate::PriceMin(Some(500))));
    assert!(predicate.matches(&make_listing("1", "a", u64::MAX, "House")));
    assert!(!predicate.matches(&make_listing("2", "a", 499, "House")));
}

#[test]
fn test_inverted_price_range_matches_nothing() {
    let predicate = compile(&FilterState::default().with_price_range(Some(200), Some(100)));
    assert!(!predicate.matches(&make_listing("1", "a", 150, "House")));
}

#[test]
fn test_property_type_membership_is_exact() {
    let predicate = compile(
        &FilterState::default().set_field(FilterUpdate::PropertyTypes(set(&["House", "Condo"]))),
    );
    assert!(predicate.matches(&make_listing("1", "a", 1, "Condo")));
    assert!(!predicate.matches(&make_listing("2", "a", 1, "condo")));
    assert!(!predicate.matches(&make_listing("3", "a", 1, "Townhouse")));
}

#[test]
fn test_fractional_bathrooms_compare_against_minimum() {
    let predicate = compile(&FilterState::default().set_field(FilterUpdate::BathroomsMin(Some(2))));

    let mut one_and_half = make_listing("1", "a", 1, "House");
    one_and_half.bathrooms = 1.5;
    let mut two_and_half = make_listing("2", "a", 1, "House");
    two_and_half.bathrooms = 2.5;

    assert!(!predicate.matches(&one_and_half));
    assert!(predicate.matches(&two_and_half));
}

#[test]
fn test_square_feet_range() {
    let state = FilterState::default()
        .set_field(FilterUpdate::SquareFeetMin(Some(800)))
        .set_field(FilterUpdate::SquareFeetMax(Some(1200)));
    let predicate = compile(&state);

    let mut small = make_listing("1", "a", 1, "House");
    small.square_feet = 799;
    let mut edge = make_listing("2", "a", 1, "House");
    edge.square_feet = 1200;

    assert!(!predicate.matches(&small));
    assert!(predicate.matches(&edge));
}

#[test]
fn test_location_only_checks_address() {
    let predicate = compile(
        &FilterState::default().set_field(FilterUpdate::Location("Austin".to_string())),
    );

    let mut in_address = make_listing("1", "Home", 1, "House");
    in_address.address = "12 Oak Dr, austin TX".to_string();
    let mut in_title = make_listing("2", "Austin Home", 1, "House");
    in_title.address = "Dallas TX".to_string();

    assert!(predicate.matches(&in_address));
    assert!(!predicate.matches(&in_title));
}

#[test]
fn test_amenities_require_all() {
    let mut listing = make_listing("1", "a", 1, "House");
    listing.features = vec!["Pool".to_string()];

    let both = compile(&FilterState::default().set_field(FilterUpdate::Amenities(set(&[
        "Pool", "Gym",
    ]))));
    let pool = compile(&FilterState::default().set_field(FilterUpdate::Amenities(set(&["Pool"]))));

    assert!(!both.matches(&listing));
    assert!(pool.matches(&listing));
}

#[test]
fn test_filter_listings_preserves_order() {
    let listings = vec![
        make_listing("1", "a", 300, "House"),
        make_listing("2", "b", 50, "House"),
        make_listing("3", "c", 100, "House"),
    ];
    let predicate = compile(&FilterState::default().set_field(FilterUpdate::PriceMin(Some(100))));

    let ids: Vec<&str> = predicate
        .filter_listings(&listings)
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}
