//! Search command implementation.
//!
//! Builds a filter state from an optional preset, the filter flags and the
//! free-text query, then prints the matching listings with their saved marker.

use homes_search::preset::to_filter_state;
use homes_search::{BrowseSession, FilterState, FilterUpdate, Presets, SavedIndex};
use homes_store::models::{FilterPreset, Listing};
use homes_store::{Record, StoreError};
use strsim::levenshtein;

use super::{CommandContext, Result, Stores};
use crate::cli::FilterArgs;
use crate::output::{format_listings_table, format_result_count, format_search_json};

/// Maximum Levenshtein distance to consider a property type a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Options for the search command.
#[derive(Debug, Default)]
pub struct SearchOptions {
    pub query: Option<String>,
    pub filters: FilterArgs,
    pub preset: Option<String>,
    pub limit: Option<usize>,
}

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if a store cannot be read or the named preset does not
/// exist.
pub async fn execute(ctx: &CommandContext, stores: &Stores, opts: &SearchOptions) -> Result<()> {
    let mut session = BrowseSession::open(&stores.listings, &stores.relations).await?;

    let base = match &opts.preset {
        Some(name) => to_filter_state(&find_preset(stores, name).await?),
        None => FilterState::default(),
    };
    let mut state = apply_filter_args(base, &opts.filters);
    if let Some(query) = &opts.query {
        state = state.set_field(FilterUpdate::SearchQuery(query.clone()));
    }
    session.replace_filter(state);

    if !ctx.quiet {
        let known = session.facets().property_types;
        for hint in property_type_hints(session.filter().property_types.iter(), &known) {
            eprintln!("warning: {hint}");
        }
    }

    let relations = session.saved_relations().await?;
    let index = SavedIndex::build(&relations);
    let results = session.results();
    let shown: Vec<&Listing> = results.iter().take(opts.limit.unwrap_or(usize::MAX)).collect();

    if ctx.json_output {
        let output = format_search_json(
            &shown,
            &index,
            results.result_count(),
            results.has_active_constraint(),
        )?;
        println!("{output}");
    } else if !ctx.quiet {
        print!(
            "{}",
            format_listings_table(&shown, &index, &ctx.currency, ctx.use_colors)
        );
        if !shown.is_empty() {
            print!(
                "{}",
                format_result_count(shown.len(), results.result_count(), ctx.use_colors)
            );
        }
    }

    Ok(())
}

/// Finds a preset by name (case-insensitive).
pub(crate) async fn find_preset(stores: &Stores, name: &str) -> Result<FilterPreset> {
    Presets::new(&stores.presets)
        .find_by_name(name)
        .await?
        .ok_or_else(|| StoreError::not_found(FilterPreset::RESOURCE, name).into())
}

/// Overlays the flags that were given onto a base filter state.
///
/// Repeatable flags replace the whole set when at least one value is given.
pub(crate) fn apply_filter_args(base: FilterState, args: &FilterArgs) -> FilterState {
    let mut state = base;

    if args.price_min.is_some() {
        state = state.set_field(FilterUpdate::PriceMin(args.price_min));
    }
    if args.price_max.is_some() {
        state = state.set_field(FilterUpdate::PriceMax(args.price_max));
    }
    if !args.property_types.is_empty() {
        state = state.set_field(FilterUpdate::PropertyTypes(
            args.property_types.iter().cloned().collect(),
        ));
    }
    if args.beds.is_some() {
        state = state.set_field(FilterUpdate::BedroomsMin(args.beds));
    }
    if args.baths.is_some() {
        state = state.set_field(FilterUpdate::BathroomsMin(args.baths));
    }
    if args.sqft_min.is_some() {
        state = state.set_field(FilterUpdate::SquareFeetMin(args.sqft_min));
    }
    if args.sqft_max.is_some() {
        state = state.set_field(FilterUpdate::SquareFeetMax(args.sqft_max));
    }
    if let Some(location) = &args.location {
        state = state.set_field(FilterUpdate::Location(location.clone()));
    }
    if !args.amenities.is_empty() {
        state = state.set_field(FilterUpdate::Amenities(
            args.amenities.iter().cloned().collect(),
        ));
    }

    state
}

/// Finds the closest known name, including case-only differences.
fn find_similar_name<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty() && *name != query)
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    (best_distance <= MAX_SUGGESTION_DISTANCE).then_some(best_match)
}

/// Builds one message per requested property type absent from the catalog.
pub(crate) fn property_type_hints<'a>(
    requested: impl Iterator<Item = &'a String>,
    known: &[String],
) -> Vec<String> {
    requested
        .filter(|t| !known.contains(t))
        .map(|t| match find_similar_name(t, known.iter().map(String::as_str)) {
            Some(suggestion) => format!(
                "no listings have property type '{t}'. Did you mean '{suggestion}'?"
            ),
            None => format!("no listings have property type '{t}'"),
        })
        .collect()
}
