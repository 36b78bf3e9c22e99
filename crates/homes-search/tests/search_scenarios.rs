//! End-to-end search scenarios over small catalogs.

use chrono::{TimeZone, Utc};
use homes_search::{search, FilterState, FilterUpdate};
use homes_store::models::{Coordinates, Listing};

fn listing(id: &str, price: u64, property_type: &str, bedrooms: u32) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {id}"),
        description: String::new(),
        address: "9 Elm Road".to_string(),
        price,
        property_type: property_type.to_string(),
        bedrooms,
        bathrooms: 1.0,
        square_feet: 1500,
        year_built: 1990,
        listed_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        images: vec![],
        features: vec![],
        coordinates: Coordinates::default(),
    }
}

fn two_listing_catalog() -> Vec<Listing> {
    vec![
        listing("1", 300_000, "House", 2),
        listing("2", 900_000, "Condo", 4),
    ]
}

fn ids<'a>(results: impl Iterator<Item = &'a Listing>) -> Vec<&'a str> {
    results.map(|l| l.id.as_str()).collect()
}

#[test]
fn test_default_filter_returns_catalog_in_order() {
    let catalog = vec![
        listing("c", 1, "Land", 0),
        listing("a", 3, "House", 3),
        listing("b", 2, "Condo", 1),
    ];
    let results = search(&catalog, &FilterState::default());
    assert_eq!(ids(results.iter()), vec!["c", "a", "b"]);
}

#[test]
fn test_price_max_scenario() {
    let catalog = two_listing_catalog();
    let state = FilterState::default().set_field(FilterUpdate::PriceMax(Some(500_000)));
    assert_eq!(ids(search(&catalog, &state).iter()), vec!["1"]);
}

#[test]
fn test_property_type_scenarios() {
    let catalog = two_listing_catalog();

    let both = FilterState::default()
        .toggle_property_type("House")
        .toggle_property_type("Condo");
    assert_eq!(ids(search(&catalog, &both).iter()), vec!["1", "2"]);

    let townhouse = FilterState::default().toggle_property_type("Townhouse");
    let results = search(&catalog, &townhouse);
    assert!(results.is_empty());
    assert!(results.has_active_constraint());
}

#[test]
fn test_query_matches_address_case_insensitively() {
    let mut lake = listing("1", 1, "House", 1);
    lake.address = "123 Lake Street".to_string();
    let mut shouting = listing("2", 1, "House", 1);
    shouting.address = "77 LAKE Street".to_string();
    let plain = listing("3", 1, "House", 1);
    let catalog = vec![lake, shouting, plain];

    let state = FilterState::default().set_field(FilterUpdate::SearchQuery("lake".to_string()));
    assert_eq!(ids(search(&catalog, &state).iter()), vec!["1", "2"]);
}

#[test]
fn test_amenities_are_conjunctive() {
    let mut pool_only = listing("1", 1, "House", 1);
    pool_only.features = vec!["Pool".to_string()];
    let catalog = vec![pool_only];

    let pool_and_gym = FilterState::default().toggle_amenity("Pool").toggle_amenity("Gym");
    assert!(search(&catalog, &pool_and_gym).is_empty());

    let pool = FilterState::default().toggle_amenity("Pool");
    assert_eq!(search(&catalog, &pool).result_count(), 1);
}

#[test]
fn test_combined_constraints() {
    let mut target = listing("hit", 450_000, "House", 3);
    target.address = "5 Shore Dr, Austin TX".to_string();
    target.features = vec!["Garage".to_string(), "Pool".to_string()];
    target.bathrooms = 2.5;

    let mut wrong_city = target.clone();
    wrong_city.id = "miss-city".to_string();
    wrong_city.address = "5 Shore Dr, Dallas TX".to_string();

    let mut too_small = target.clone();
    too_small.id = "miss-beds".to_string();
    too_small.bedrooms = 2;

    let catalog = vec![wrong_city, target, too_small];
    let state = FilterState::default()
        .with_price_range(Some(400_000), Some(500_000))
        .toggle_property_type("House")
        .set_field(FilterUpdate::BedroomsMin(Some(3)))
        .set_field(FilterUpdate::BathroomsMin(Some(2)))
        .set_field(FilterUpdate::Location("austin".to_string()))
        .toggle_amenity("Pool");

    assert_eq!(ids(search(&catalog, &state).iter()), vec!["hit"]);
}

#[test]
fn test_clearing_filters_restores_full_catalog() {
    let catalog = two_listing_catalog();
    let narrowed = FilterState::default()
        .set_field(FilterUpdate::BedroomsMin(Some(4)))
        .set_field(FilterUpdate::SearchQuery("Listing".to_string()));
    assert_eq!(search(&catalog, &narrowed).result_count(), 1);

    let cleared = FilterState::clear();
    assert_eq!(search(&catalog, &cleared).to_vec(), catalog);
}
