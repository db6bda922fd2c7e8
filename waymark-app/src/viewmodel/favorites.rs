use waymark_core::{Place, PlaceId};

use super::{error_text, update_matching};
use crate::repository::PlaceRepository;

/// What the favorites screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesUiState {
    /// An operation is in progress.
    pub is_loading: bool,
    /// Places marked as favorites.
    pub favorites: Vec<Place>,
    /// Message from the last failed operation.
    pub error: Option<String>,
}

/// The user's favorite places.
#[derive(Debug)]
pub struct FavoritesViewModel {
    places: PlaceRepository,
    state: FavoritesUiState,
}

impl FavoritesViewModel {
    /// Create the view model and load the favorites.
    #[must_use]
    pub fn new(places: PlaceRepository) -> Self {
        let mut view_model = Self {
            places,
            state: FavoritesUiState::default(),
        };
        view_model.load_favorites();
        view_model
    }

    /// Current screen state.
    #[must_use]
    pub const fn state(&self) -> &FavoritesUiState {
        &self.state
    }

    /// Reload the favorites from the store.
    pub fn load_favorites(&mut self) {
        self.state.is_loading = true;
        match self.places.favorite_places() {
            Ok(favorites) => {
                self.state.favorites = favorites;
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }

    /// Unmark a place and drop it from the list.
    pub fn remove_from_favorites(&mut self, id: PlaceId) {
        if let Err(err) = self.places.toggle_favorite(id, false) {
            self.state.error = error_text(&err);
            return;
        }
        self.state.favorites.retain(|place| place.id != id);
    }

    /// Set the offline flag of a favorite.
    pub fn toggle_offline(&mut self, id: PlaceId, available: bool) {
        if let Err(err) = self.places.toggle_offline(id, available) {
            self.state.error = error_text(&err);
            return;
        }
        update_matching(
            &mut self.state.favorites,
            |p| p.id == id,
            |p| p.offline_available = available,
        );
    }
}
