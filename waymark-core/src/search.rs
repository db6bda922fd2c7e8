//! Local place search.
//!
//! The search is a linear, case-insensitive substring scan over a slice of
//! places. When it finds fewer than [`MIN_LOCAL_RESULTS`] matches it offers a
//! synthetic placeholder that sends the user to a web search instead.

use geo::Coord;
use url::Url;

use crate::{NewPlace, Place, PlaceId};

/// Identifier of the synthetic "search the web" placeholder.
pub const WEB_SEARCH_PLACE_ID: PlaceId = -100;

/// Below this many local matches a web-search placeholder is offered.
pub const MIN_LOCAL_RESULTS: usize = 3;

const WEB_SEARCH_ENDPOINT: &str = "https://www.google.com/search";
const WEB_SEARCH_SUFFIX: &str = "sights museums";

/// Result of [`search_places`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Matching places in source order.
    pub matches: Vec<Place>,
    /// Placeholder offered when the local result set is thin.
    pub web_suggestion: Option<Place>,
}

impl SearchOutcome {
    /// Flatten into the list shown to the user: matches followed by the
    /// placeholder, if any.
    #[must_use]
    pub fn into_places(self) -> Vec<Place> {
        let mut places = self.matches;
        places.extend(self.web_suggestion);
        places
    }
}

/// Search `places` for `query`.
///
/// A blank query matches everything and never yields a placeholder.
/// Otherwise a place matches when its name, description or category contains
/// the query, ignoring case.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::{NewPlace, WEB_SEARCH_PLACE_ID, search_places};
///
/// let places = vec![
///     NewPlace::new("Hermitage", "Art museum", "Museums", Coord { x: 30.3, y: 59.9 }).into_place(1),
///     NewPlace::new("Peterhof", "Fountains", "Parks", Coord { x: 29.9, y: 59.9 }).into_place(2),
/// ];
///
/// let outcome = search_places("MUSEUM", &places);
/// assert_eq!(outcome.matches.len(), 1);
/// assert_eq!(outcome.web_suggestion.map(|p| p.id), Some(WEB_SEARCH_PLACE_ID));
/// ```
#[must_use]
pub fn search_places(query: &str, places: &[Place]) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome {
            matches: places.to_vec(),
            web_suggestion: None,
        };
    }

    let needle = query.to_lowercase();
    let matches: Vec<Place> = places
        .iter()
        .filter(|place| matches_query(place, &needle))
        .cloned()
        .collect();
    let web_suggestion = (matches.len() < MIN_LOCAL_RESULTS).then(|| web_search_place(query));

    SearchOutcome {
        matches,
        web_suggestion,
    }
}

/// Flat form of [`search_places`].
#[must_use]
pub fn filter_places(query: &str, places: &[Place]) -> Vec<Place> {
    search_places(query, places).into_places()
}

fn matches_query(place: &Place, needle: &str) -> bool {
    [&place.name, &place.description, &place.category]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Build the placeholder entry that stands for a web search on `query`.
#[must_use]
pub fn web_search_place(query: &str) -> Place {
    NewPlace::new(
        format!("Search the web: {query}"),
        "Tap to find more results online",
        "Search",
        Coord { x: 0.0, y: 0.0 },
    )
    .into_place(WEB_SEARCH_PLACE_ID)
}

/// Whether `place` is the web-search placeholder.
#[must_use]
pub const fn is_web_search_place(place: &Place) -> bool {
    place.id == WEB_SEARCH_PLACE_ID
}

/// Browser URL for a web search on `query`.
///
/// # Errors
/// Only fails if the built-in endpoint cannot be parsed.
///
/// # Examples
/// ```
/// use waymark_core::web_search_url;
///
/// let url = web_search_url("red square")?;
/// assert_eq!(url.host_str(), Some("www.google.com"));
/// assert_eq!(url.query(), Some("q=red+square+sights+museums"));
/// # Ok::<(), url::ParseError>(())
/// ```
pub fn web_search_url(query: &str) -> Result<Url, url::ParseError> {
    let terms = format!("{} {WEB_SEARCH_SUFFIX}", query.trim());
    Url::parse_with_params(WEB_SEARCH_ENDPOINT, &[("q", terms)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn place(id: PlaceId, name: &str, description: &str, category: &str) -> Place {
        NewPlace::new(name, description, category, Coord { x: 0.0, y: 0.0 }).into_place(id)
    }

    #[fixture]
    fn catalogue() -> Vec<Place> {
        vec![
            place(1, "Red Square", "Main square of Moscow", "Landmarks"),
            place(2, "Hermitage Museum", "Art collection", "Museums"),
            place(3, "Tretyakov Gallery", "Russian art museum", "Museums"),
            place(4, "Gorky Park", "Central park of Moscow", "Parks"),
            place(5, "Kazan Kremlin", "Fortress", "Landmarks"),
        ]
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_query_returns_input(#[case] query: &str, catalogue: Vec<Place>) {
        assert_eq!(filter_places(query, &catalogue), catalogue);
    }

    #[rstest]
    fn matches_any_text_field_in_source_order(catalogue: Vec<Place>) {
        let outcome = search_places("moscow", &catalogue);
        let ids: Vec<_> = outcome.matches.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(outcome.web_suggestion.is_some());
    }

    #[rstest]
    fn category_matches_count(catalogue: Vec<Place>) {
        let outcome = search_places("Museum", &catalogue);
        let ids: Vec<_> = outcome.matches.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[rstest]
    fn three_matches_suppress_placeholder(catalogue: Vec<Place>) {
        let results = filter_places("a", &catalogue);
        assert!(results.len() >= MIN_LOCAL_RESULTS);
        assert!(!results.iter().any(is_web_search_place));
    }

    #[rstest]
    fn no_matches_yield_only_placeholder(catalogue: Vec<Place>) {
        let results = filter_places("volcano", &catalogue);
        assert_eq!(results.len(), 1);
        let placeholder = results.first().expect("placeholder");
        assert_eq!(placeholder.id, WEB_SEARCH_PLACE_ID);
        assert_eq!(placeholder.name, "Search the web: volcano");
        assert_eq!(placeholder.category, "Search");
    }

    #[rstest]
    fn matching_ignores_case_for_cyrillic() {
        let places = vec![place(1, "Эрмитаж", "Музей", "Музеи")];
        let outcome = search_places("эрмитаж", &places);
        assert_eq!(outcome.matches.len(), 1);
    }

    #[rstest]
    fn web_search_url_encodes_query() {
        let url = web_search_url("Kazan & Kremlin").expect("valid url");
        assert_eq!(url.path(), "/search");
        let query: Vec<_> = url.query_pairs().collect();
        assert_eq!(query.len(), 1);
        let (key, value) = query.first().expect("q parameter");
        assert_eq!(key, "q");
        assert_eq!(value, "Kazan & Kremlin sights museums");
    }
}
