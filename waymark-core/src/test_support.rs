//! Test-only, in-memory store implementation used by unit and behaviour
//! tests.

use std::sync::{Mutex, MutexGuard};

use geo::{Intersects, Rect};

use crate::{
    NewPlace, NewRoute, NewUser, Place, PlaceId, PlaceStore, Route, RouteId, RouteStore,
    StoreError, User, UserId, UserStore,
};

#[derive(Debug, Default)]
struct State {
    places: Vec<Place>,
    routes: Vec<Route>,
    users: Vec<User>,
    next_id: i64,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of every store trait.
///
/// Records live in vectors and every query is a linear scan, so the store is
/// intended only for small datasets. Identifiers are drawn from a single
/// counter shared by all three tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create a store pre-populated with `places`.
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = NewPlace>,
    {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap_or_else(|e| e.into_inner());
            for place in places {
                let id = state.allocate_id();
                state.places.push(place.into_place(id));
            }
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn filtered<T: Clone>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| keep(item)).cloned().collect()
}

impl PlaceStore for MemoryStore {
    fn insert_place(&self, place: &NewPlace) -> Result<PlaceId, StoreError> {
        let mut state = self.lock()?;
        let id = state.allocate_id();
        state.places.push(place.clone().into_place(id));
        Ok(id)
    }

    fn insert_places(&self, places: &[NewPlace]) -> Result<Vec<PlaceId>, StoreError> {
        places.iter().map(|place| self.insert_place(place)).collect()
    }

    fn update_place(&self, place: &Place) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slot = state
            .places
            .iter_mut()
            .find(|p| p.id == place.id)
            .ok_or(StoreError::NotFound {
                entity: "place",
                id: place.id,
            })?;
        *slot = place.clone();
        Ok(())
    }

    fn all_places(&self) -> Result<Vec<Place>, StoreError> {
        Ok(self.lock()?.places.clone())
    }

    fn place_by_id(&self, id: PlaceId) -> Result<Option<Place>, StoreError> {
        Ok(self.lock()?.places.iter().find(|p| p.id == id).cloned())
    }

    fn places_by_category(&self, category: &str) -> Result<Vec<Place>, StoreError> {
        Ok(filtered(&self.lock()?.places, |p| p.category == category))
    }

    fn favorite_places(&self) -> Result<Vec<Place>, StoreError> {
        Ok(filtered(&self.lock()?.places, |p| p.favorite))
    }

    fn offline_places(&self) -> Result<Vec<Place>, StoreError> {
        Ok(filtered(&self.lock()?.places, |p| p.offline_available))
    }

    fn set_favorite(&self, id: PlaceId, favorite: bool) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let place = state
            .places
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { entity: "place", id })?;
        place.favorite = favorite;
        Ok(())
    }

    fn set_offline_available(&self, id: PlaceId, available: bool) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let place = state
            .places
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { entity: "place", id })?;
        place.offline_available = available;
        Ok(())
    }

    fn places_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<Place>, StoreError> {
        let bbox = *bbox;
        // `Intersects` treats boundary points as inside the rectangle.
        Ok(filtered(&self.lock()?.places, |p| {
            bbox.intersects(&p.location)
        }))
    }
}

impl RouteStore for MemoryStore {
    fn insert_route(&self, route: &NewRoute) -> Result<RouteId, StoreError> {
        let mut state = self.lock()?;
        let id = state.allocate_id();
        state.routes.push(route.clone().into_route(id));
        Ok(id)
    }

    fn update_route(&self, route: &Route) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slot = state
            .routes
            .iter_mut()
            .find(|r| r.id == route.id)
            .ok_or(StoreError::NotFound {
                entity: "route",
                id: route.id,
            })?;
        *slot = route.clone();
        Ok(())
    }

    fn routes_for_user(&self, user_id: UserId) -> Result<Vec<Route>, StoreError> {
        Ok(filtered(&self.lock()?.routes, |r| r.user_id == user_id))
    }

    fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        Ok(self.lock()?.routes.iter().find(|r| r.id == id).cloned())
    }

    fn delete_route(&self, id: RouteId) -> Result<(), StoreError> {
        self.lock()?.routes.retain(|r| r.id != id);
        Ok(())
    }

    fn set_route_offline_available(
        &self,
        id: RouteId,
        available: bool,
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let route = state
            .routes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { entity: "route", id })?;
        route.offline_available = available;
        Ok(())
    }

    fn offline_routes(&self) -> Result<Vec<Route>, StoreError> {
        Ok(filtered(&self.lock()?.routes, |r| r.offline_available))
    }
}

impl UserStore for MemoryStore {
    fn insert_user(&self, user: &NewUser) -> Result<Option<UserId>, StoreError> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let id = state.allocate_id();
        state.users.push(user.clone().into_user(id));
        Ok(Some(id))
    }

    fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound {
                entity: "user",
                id: user.id,
            })?;
        *slot = user.clone();
        Ok(())
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    fn user_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned())
    }

    fn all_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock()?.users.clone())
    }
}
