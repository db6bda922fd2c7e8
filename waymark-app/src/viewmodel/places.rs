use std::collections::BTreeSet;

use waymark_core::{Place, PlaceId, filter_places};

use super::{error_text, update_matching};
use crate::repository::PlaceRepository;

/// What the place list shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacesUiState {
    /// An operation is in progress.
    pub is_loading: bool,
    /// Every stored place.
    pub places: Vec<Place>,
    /// Places currently listed after category or search filtering.
    pub filtered_places: Vec<Place>,
    /// Active category filter.
    pub selected_category: Option<String>,
    /// Distinct categories of the loaded places, sorted.
    pub categories: BTreeSet<String>,
    /// Message from the last failed operation.
    pub error: Option<String>,
}

/// Browsing and filtering the place catalogue.
#[derive(Debug)]
pub struct PlacesViewModel {
    places: PlaceRepository,
    state: PlacesUiState,
}

impl PlacesViewModel {
    /// Create the view model and load every place.
    #[must_use]
    pub fn new(places: PlaceRepository) -> Self {
        let mut view_model = Self {
            places,
            state: PlacesUiState::default(),
        };
        view_model.load_places();
        view_model
    }

    /// Current screen state.
    #[must_use]
    pub const fn state(&self) -> &PlacesUiState {
        &self.state
    }

    /// Reload every place and the category set.
    pub fn load_places(&mut self) {
        self.state.is_loading = true;
        match self.places.all_places() {
            Ok(places) => {
                self.state.categories = places.iter().map(|p| p.category.clone()).collect();
                self.state.filtered_places.clone_from(&places);
                self.state.places = places;
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }

    /// Show only places in `category`, or every place for `None`.
    pub fn filter_by_category(&mut self, category: Option<&str>) {
        self.state.selected_category = category.map(str::to_owned);
        let Some(name) = category else {
            self.state.filtered_places.clone_from(&self.state.places);
            return;
        };
        self.state.is_loading = true;
        match self.places.places_by_category(name) {
            Ok(places) => {
                self.state.filtered_places = places;
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }

    /// List the loaded places matching `query`.
    ///
    /// Thin results end with the web-search placeholder.
    pub fn search(&mut self, query: &str) {
        self.state.filtered_places = filter_places(query, &self.state.places);
    }

    /// Set the favorite flag of a place.
    pub fn toggle_favorite(&mut self, id: PlaceId, favorite: bool) {
        if let Err(err) = self.places.toggle_favorite(id, favorite) {
            self.state.error = error_text(&err);
            return;
        }
        let set = |place: &mut Place| place.favorite = favorite;
        update_matching(&mut self.state.places, |p| p.id == id, set);
        update_matching(&mut self.state.filtered_places, |p| p.id == id, set);
    }

    /// Set the offline flag of a place.
    pub fn toggle_offline(&mut self, id: PlaceId, available: bool) {
        if let Err(err) = self.places.toggle_offline(id, available) {
            self.state.error = error_text(&err);
            return;
        }
        let set = |place: &mut Place| place.offline_available = available;
        update_matching(&mut self.state.places, |p| p.id == id, set);
        update_matching(&mut self.state.filtered_places, |p| p.id == id, set);
    }

    /// Install the curated places, then reload.
    pub fn load_predefined_places(&mut self) {
        self.state.is_loading = true;
        match self.places.load_predefined_places() {
            Ok(_) => self.load_places(),
            Err(err) => {
                self.state.error = error_text(&err);
                self.state.is_loading = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use waymark_core::{NewPlace, WEB_SEARCH_PLACE_ID, test_support::MemoryStore};

    #[fixture]
    fn view_model() -> PlacesViewModel {
        let store = MemoryStore::with_places([
            NewPlace::new("Peterhof", "Fountains", "Parks", Coord { x: 29.9, y: 59.88 }),
            NewPlace::new("Hermitage", "Art", "Museums", Coord { x: 30.3, y: 59.94 }),
            NewPlace::new("Sochi Park", "Rides", "Parks", Coord { x: 39.96, y: 43.4 }),
        ]);
        PlacesViewModel::new(PlaceRepository::new(Arc::new(store)))
    }

    fn names(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.name.as_str()).collect()
    }

    #[rstest]
    fn categories_are_sorted_and_unique(view_model: PlacesViewModel) {
        let categories: Vec<_> = view_model.state().categories.iter().cloned().collect();
        assert_eq!(categories, vec!["Museums", "Parks"]);
    }

    #[rstest]
    fn category_filter_and_reset(mut view_model: PlacesViewModel) {
        view_model.filter_by_category(Some("Parks"));
        assert_eq!(
            names(&view_model.state().filtered_places),
            vec!["Peterhof", "Sochi Park"]
        );
        view_model.filter_by_category(None);
        assert_eq!(view_model.state().filtered_places.len(), 3);
        assert_eq!(view_model.state().selected_category, None);
    }

    #[rstest]
    fn favorite_toggle_updates_both_lists(mut view_model: PlacesViewModel) {
        view_model.filter_by_category(Some("Museums"));
        let id = view_model
            .state()
            .filtered_places
            .first()
            .map(|p| p.id)
            .expect("museum");
        view_model.toggle_favorite(id, true);
        let state = view_model.state();
        assert!(state.filtered_places.iter().all(|p| p.favorite));
        assert_eq!(state.places.iter().filter(|p| p.favorite).count(), 1);
    }

    #[rstest]
    fn unknown_place_toggle_reports_error(mut view_model: PlacesViewModel) {
        view_model.toggle_offline(999, true);
        assert!(view_model.state().error.is_some());
        assert!(view_model.state().places.iter().all(|p| !p.offline_available));
    }

    #[rstest]
    fn thin_search_appends_placeholder(mut view_model: PlacesViewModel) {
        view_model.search("fountain");
        let ids: Vec<_> = view_model
            .state()
            .filtered_places
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.last(), Some(&WEB_SEARCH_PLACE_ID));
    }

    #[rstest]
    fn predefined_places_are_added_and_listed(mut view_model: PlacesViewModel) {
        view_model.load_predefined_places();
        let state = view_model.state();
        assert_eq!(state.places.len(), 3 + 5);
        assert!(state.categories.contains("Theatres"));
        assert!(!state.is_loading);
    }
}
