use geo::Rect;
use log::warn;
use url::Url;
use waymark_core::{Place, PlaceId, search_places, web_search_url};

use super::{error_text, update_matching};
use crate::repository::PlaceRepository;

/// What the map screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapUiState {
    /// An operation is in progress.
    pub is_loading: bool,
    /// Every stored place.
    pub places: Vec<Place>,
    /// Places inside the last requested viewport.
    pub visible_places: Vec<Place>,
    /// The place whose details are open.
    pub selected_place: Option<Place>,
    /// Results of the last search, placeholder included.
    pub search_results: Vec<Place>,
    /// Browser URL offered when the last search was thin.
    pub web_search_url: Option<Url>,
    /// Message from the last failed operation.
    pub error: Option<String>,
}

/// Places on the map, selection and search.
#[derive(Debug)]
pub struct MapViewModel {
    places: PlaceRepository,
    state: MapUiState,
}

impl MapViewModel {
    /// Create the view model and load every place.
    #[must_use]
    pub fn new(places: PlaceRepository) -> Self {
        let mut view_model = Self {
            places,
            state: MapUiState::default(),
        };
        view_model.load_places();
        view_model
    }

    /// Current screen state.
    #[must_use]
    pub const fn state(&self) -> &MapUiState {
        &self.state
    }

    /// Reload every place.
    pub fn load_places(&mut self) {
        self.state.is_loading = true;
        match self.places.all_places() {
            Ok(places) => {
                self.state.places = places;
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }

    /// Open the details of a loaded place; unknown ids clear the selection.
    pub fn select_place(&mut self, id: PlaceId) {
        self.state.selected_place = self.state.places.iter().find(|p| p.id == id).cloned();
    }

    /// Close the details panel.
    pub fn clear_selected_place(&mut self) {
        self.state.selected_place = None;
    }

    /// Set the favorite flag of a place, keeping the selection in step.
    pub fn toggle_favorite(&mut self, id: PlaceId, favorite: bool) {
        if let Err(err) = self.places.toggle_favorite(id, favorite) {
            self.state.error = error_text(&err);
            return;
        }
        update_matching(
            &mut self.state.places,
            |p| p.id == id,
            |p| p.favorite = favorite,
        );
        if let Some(selected) = self.state.selected_place.as_mut().filter(|p| p.id == id) {
            selected.favorite = favorite;
        }
    }

    /// Search the loaded places.
    ///
    /// When the results are thin the state also carries the browser URL for
    /// the same query.
    pub fn search(&mut self, query: &str) {
        let outcome = search_places(query, &self.state.places);
        self.state.web_search_url = if outcome.web_suggestion.is_some() {
            web_search_url(query)
                .inspect_err(|err| warn!("failed to build web search URL: {err}"))
                .ok()
        } else {
            None
        };
        self.state.search_results = outcome.into_places();
    }

    /// Load the places inside `bbox`.
    pub fn places_in_view(&mut self, bbox: &Rect<f64>) {
        match self.places.places_in_bbox(bbox) {
            Ok(places) => {
                self.state.visible_places = places;
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
    }
}
