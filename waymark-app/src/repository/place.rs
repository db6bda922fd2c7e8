use std::{collections::HashSet, sync::Arc};

use geo::Rect;
use log::info;
use waymark_core::{NewPlace, Place, PlaceId, PlaceStore, StoreError, seed::curated_places};

/// Access to places for the view models.
#[derive(Clone)]
pub struct PlaceRepository {
    store: Arc<dyn PlaceStore + Send + Sync>,
}

impl std::fmt::Debug for PlaceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceRepository").finish_non_exhaustive()
    }
}

impl PlaceRepository {
    /// Wrap `store`.
    #[must_use]
    pub fn new(store: Arc<dyn PlaceStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// All places in store order.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn all_places(&self) -> Result<Vec<Place>, StoreError> {
        self.store.all_places()
    }

    /// A single place, if present.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn place_by_id(&self, id: PlaceId) -> Result<Option<Place>, StoreError> {
        self.store.place_by_id(id)
    }

    /// Places in `category`.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn places_by_category(&self, category: &str) -> Result<Vec<Place>, StoreError> {
        self.store.places_by_category(category)
    }

    /// Places marked as favorites.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn favorite_places(&self) -> Result<Vec<Place>, StoreError> {
        self.store.favorite_places()
    }

    /// Places kept for offline use.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn offline_places(&self) -> Result<Vec<Place>, StoreError> {
        self.store.offline_places()
    }

    /// Places inside `bbox`.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn places_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<Place>, StoreError> {
        self.store.places_in_bbox(bbox)
    }

    /// Store a new place.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn insert_place(&self, place: &NewPlace) -> Result<PlaceId, StoreError> {
        self.store.insert_place(place)
    }

    /// Store several places at once.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn insert_places(&self, places: &[NewPlace]) -> Result<Vec<PlaceId>, StoreError> {
        self.store.insert_places(places)
    }

    /// Replace a stored place.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when the place does not exist.
    pub fn update_place(&self, place: &Place) -> Result<(), StoreError> {
        self.store.update_place(place)
    }

    /// Set the favorite flag.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when the place does not exist.
    pub fn toggle_favorite(&self, id: PlaceId, favorite: bool) -> Result<(), StoreError> {
        self.store.set_favorite(id, favorite)
    }

    /// Set the offline flag.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when the place does not exist.
    pub fn toggle_offline(&self, id: PlaceId, available: bool) -> Result<(), StoreError> {
        self.store.set_offline_available(id, available)
    }

    /// Install the curated places that are not stored yet.
    ///
    /// Places are matched by name, so repeated calls insert nothing new.
    /// Returns the number of places inserted.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn load_predefined_places(&self) -> Result<usize, StoreError> {
        let existing: HashSet<String> = self
            .store
            .all_places()?
            .into_iter()
            .map(|place| place.name)
            .collect();
        let missing: Vec<NewPlace> = curated_places()
            .into_iter()
            .filter(|place| !existing.contains(&place.name))
            .collect();
        let inserted = self.store.insert_places(&missing)?.len();
        info!("installed {inserted} predefined places");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use waymark_core::test_support::MemoryStore;

    #[fixture]
    fn repository() -> PlaceRepository {
        let store = MemoryStore::with_places([NewPlace::new(
            "Red Square",
            "Main square",
            "Landmarks",
            Coord { x: 37.62, y: 55.75 },
        )]);
        PlaceRepository::new(Arc::new(store))
    }

    #[rstest]
    fn predefined_places_skip_existing_names(repository: PlaceRepository) {
        let inserted = repository.load_predefined_places().expect("install");
        assert_eq!(inserted, curated_places().len() - 1);
        assert_eq!(
            repository.load_predefined_places().expect("reinstall"),
            0
        );
        assert_eq!(
            repository.all_places().expect("list").len(),
            curated_places().len()
        );
    }

    #[rstest]
    fn toggles_reach_the_store(repository: PlaceRepository) {
        let id = repository
            .all_places()
            .expect("list")
            .first()
            .map(|p| p.id)
            .expect("seeded place");
        repository.toggle_favorite(id, true).expect("favorite");
        repository.toggle_offline(id, true).expect("offline");
        let place = repository
            .place_by_id(id)
            .expect("load")
            .expect("exists");
        assert!(place.favorite && place.offline_available);
    }

    #[rstest]
    fn toggling_unknown_place_fails(repository: PlaceRepository) {
        let err = repository.toggle_favorite(404, true).expect_err("missing");
        assert!(matches!(err, StoreError::NotFound { id: 404, .. }));
    }
}
