use std::sync::Arc;

use log::debug;
use waymark_core::{NewRoute, Route, RouteId, RouteStore, StoreError, UserId};

/// Access to routes for the view models.
#[derive(Clone)]
pub struct RouteRepository {
    store: Arc<dyn RouteStore + Send + Sync>,
}

impl std::fmt::Debug for RouteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRepository").finish_non_exhaustive()
    }
}

impl RouteRepository {
    /// Wrap `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RouteStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Routes owned by `user_id`.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn user_routes(&self, user_id: UserId) -> Result<Vec<Route>, StoreError> {
        self.store.routes_for_user(user_id)
    }

    /// A single route, if present.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        self.store.route_by_id(id)
    }

    /// Routes kept for offline use.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn offline_routes(&self) -> Result<Vec<Route>, StoreError> {
        self.store.offline_routes()
    }

    /// Persist a planned route and return its identifier.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn create_route(&self, route: &NewRoute) -> Result<RouteId, StoreError> {
        let id = self.store.insert_route(route)?;
        debug!("created route {id} for user {}", route.user_id);
        Ok(id)
    }

    /// Replace a stored route.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when the route does not exist.
    pub fn update_route(&self, route: &Route) -> Result<(), StoreError> {
        self.store.update_route(route)
    }

    /// Delete a route; missing routes are ignored.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from the backing store.
    pub fn delete_route(&self, id: RouteId) -> Result<(), StoreError> {
        self.store.delete_route(id)
    }

    /// Set the offline flag.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when the route does not exist.
    pub fn toggle_offline(&self, id: RouteId, available: bool) -> Result<(), StoreError> {
        self.store.set_route_offline_available(id, available)
    }
}
