//! Controlled vocabularies of the categorical fields.

/// Source terms of `typeOfSearch` and their canonical equivalent.
///
/// Lookup happens after lowercasing. Terms absent from the table map to
/// themselves.
pub const SEARCH_TYPE_ALIASES: &[(&str, &str)] = &[("vente", "achat")];

/// The only `typeOfSearch` value kept by the pipeline.
pub const SEARCH_TYPE: &str = "achat";

/// `typeOfBuilding` values kept by the pipeline.
pub const BUILDING_TYPES: &[&str] = &["appartement", "maison"];

/// Canonical form of a lowercased `typeOfSearch` term.
pub fn canonical_search_type(term: &str) -> &str {
    SEARCH_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == term)
        .map_or(term, |(_, canonical)| *canonical)
}

/// Whether a lowercased `typeOfBuilding` value is retained.
pub fn is_kept_building_type(value: &str) -> bool {
    BUILDING_TYPES.contains(&value)
}
