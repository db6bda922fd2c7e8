use log::warn;
use waymark_core::{NewRoute, Place, PlaceId, Route, RouteId, StoreError, UserId};

use super::{error_text, update_matching};
use crate::repository::{PlaceRepository, RouteRepository};

/// What the routes screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutesUiState {
    /// An operation is in progress.
    pub is_loading: bool,
    /// Routes owned by the user.
    pub routes: Vec<Route>,
    /// Identifier of the open route.
    pub selected_route_id: Option<RouteId>,
    /// The open route.
    pub selected_route: Option<Route>,
    /// Places of the open route, in route order.
    pub selected_route_places: Vec<Place>,
    /// Places that can start or end a new route.
    pub available_places: Vec<Place>,
    /// Message from the last failed operation.
    pub error: Option<String>,
}

impl RoutesUiState {
    fn clear_selection(&mut self) {
        self.selected_route_id = None;
        self.selected_route = None;
        self.selected_route_places.clear();
    }
}

/// Planning and managing one user's routes.
#[derive(Debug)]
pub struct RoutesViewModel {
    routes: RouteRepository,
    places: PlaceRepository,
    user_id: UserId,
    state: RoutesUiState,
}

impl RoutesViewModel {
    /// Create the view model for `user_id` and load routes and places.
    #[must_use]
    pub fn new(routes: RouteRepository, places: PlaceRepository, user_id: UserId) -> Self {
        let mut view_model = Self {
            routes,
            places,
            user_id,
            state: RoutesUiState::default(),
        };
        view_model.load_routes();
        view_model.load_places();
        view_model
    }

    /// Current screen state.
    #[must_use]
    pub const fn state(&self) -> &RoutesUiState {
        &self.state
    }

    /// Reload the user's routes.
    pub fn load_routes(&mut self) {
        self.state.is_loading = true;
        match self.routes.user_routes(self.user_id) {
            Ok(routes) => {
                self.state.routes = routes;
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }

    /// Reload the places available for planning.
    pub fn load_places(&mut self) {
        match self.places.all_places() {
            Ok(places) => self.state.available_places = places,
            Err(err) => self.state.error = Some(format!("failed to load places: {err}")),
        }
    }

    fn route_places(&self, route: &Route) -> Result<Vec<Place>, StoreError> {
        let mut places = Vec::with_capacity(route.place_ids.len());
        for id in &route.place_ids {
            match self.places.place_by_id(*id)? {
                Some(place) => places.push(place),
                None => warn!("route {} references missing place {id}", route.id),
            }
        }
        Ok(places)
    }

    /// Open a route; ids of zero or below clear the selection.
    pub fn select_route(&mut self, id: RouteId) {
        if id <= 0 {
            self.state.clear_selection();
            return;
        }

        self.state.is_loading = true;
        self.state.selected_route_id = Some(id);
        let loaded = self.routes.route_by_id(id).and_then(|route| {
            route
                .map(|found| self.route_places(&found).map(|places| (found, places)))
                .transpose()
        });
        match loaded {
            Ok(Some((route, places))) => {
                self.state.selected_route = Some(route);
                self.state.selected_route_places = places;
                self.state.error = None;
            }
            Ok(None) => {
                self.state.clear_selection();
                self.state.error = error_text(&StoreError::NotFound { entity: "route", id });
            }
            Err(err) => {
                self.state.clear_selection();
                self.state.error = error_text(&err);
            }
        }
        self.state.is_loading = false;
    }

    /// Plan a walk from `start` to `end`, store it and open it.
    ///
    /// Returns the new route's identifier, or `None` when planning or
    /// storing failed (the state carries the reason).
    pub fn create_route(&mut self, name: &str, start: &Place, end: &Place) -> Option<RouteId> {
        self.state.is_loading = true;
        let created = NewRoute::between(name, self.user_id, start, end)
            .map_err(|err| err.to_string())
            .and_then(|route| self.routes.create_route(&route).map_err(|err| err.to_string()));
        match created {
            Ok(id) => {
                self.load_routes();
                self.select_route(id);
                Some(id)
            }
            Err(message) => {
                self.state.error = Some(message);
                self.state.is_loading = false;
                None
            }
        }
    }

    /// Delete a route and reload the list.
    pub fn delete_route(&mut self, id: RouteId) {
        self.state.is_loading = true;
        if let Err(err) = self.routes.delete_route(id) {
            self.state.error = error_text(&err);
            self.state.is_loading = false;
            return;
        }
        self.state.clear_selection();
        self.load_routes();
    }

    fn toggle_places_offline(
        &self,
        place_ids: &[PlaceId],
        available: bool,
    ) -> Result<(), StoreError> {
        for id in place_ids {
            match self.places.toggle_offline(*id, available) {
                Ok(()) => {}
                Err(StoreError::NotFound { .. }) => {
                    warn!("skipping offline toggle for missing place {id}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Set the offline flag of a route and of every place it visits.
    pub fn toggle_offline(&mut self, id: RouteId, available: bool) {
        let place_ids = match self.routes.route_by_id(id) {
            Ok(Some(route)) => route.place_ids,
            Ok(None) => {
                self.state.error = error_text(&StoreError::NotFound { entity: "route", id });
                return;
            }
            Err(err) => {
                self.state.error = error_text(&err);
                return;
            }
        };
        let toggled = self
            .routes
            .toggle_offline(id, available)
            .and_then(|()| self.toggle_places_offline(&place_ids, available));
        if let Err(err) = toggled {
            self.state.error = error_text(&err);
            return;
        }

        let set_route = |route: &mut Route| route.offline_available = available;
        update_matching(&mut self.state.routes, |r| r.id == id, set_route);
        if let Some(route) = self.state.selected_route.as_mut().filter(|r| r.id == id) {
            set_route(route);
            update_matching(
                &mut self.state.selected_route_places,
                |_| true,
                |p| p.offline_available = available,
            );
        }
        update_matching(
            &mut self.state.available_places,
            |p| place_ids.contains(&p.id),
            |p| p.offline_available = available,
        );
    }
}
