//! Walking routes between places.
//!
//! A route stores the ordered identifiers of the places it visits together
//! with the distance and duration estimated when it was planned.

use thiserror::Error;

use crate::{Place, PlaceId, RouteEstimate, UserId};

/// Identifier assigned to a route by the store.
pub type RouteId = i64;

/// A stored route owned by a user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Store-assigned identifier.
    pub id: RouteId,
    /// Display name.
    pub name: String,
    /// Owner.
    pub user_id: UserId,
    /// Places visited, in order.
    pub place_ids: Vec<PlaceId>,
    /// Total walking distance in kilometres.
    pub total_distance_km: f64,
    /// Estimated walking time in minutes.
    pub estimated_minutes: u32,
    /// Whether the route is kept for offline use.
    pub offline_available: bool,
}

/// Errors returned by [`NewRoute::between`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The route name was empty or whitespace.
    #[error("route name must not be empty")]
    EmptyName,
}

/// A route that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoute {
    /// Display name.
    pub name: String,
    /// Owner.
    pub user_id: UserId,
    /// Places visited, in order.
    pub place_ids: Vec<PlaceId>,
    /// Total walking distance in kilometres.
    pub total_distance_km: f64,
    /// Estimated walking time in minutes.
    pub estimated_minutes: u32,
}

impl NewRoute {
    /// Construct a route from precomputed figures.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        user_id: UserId,
        place_ids: Vec<PlaceId>,
        total_distance_km: f64,
        estimated_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            user_id,
            place_ids,
            total_distance_km,
            estimated_minutes,
        }
    }

    /// Plan a two-point walk from `start` to `end`.
    ///
    /// A start place without a stored identifier (such as
    /// [`Place::current_location`]) contributes its position to the estimate
    /// but is left out of `place_ids`.
    ///
    /// # Errors
    /// Returns [`RouteError::EmptyName`] when `name` is blank.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use waymark_core::{DEFAULT_CURRENT_LOCATION, NewPlace, NewRoute, Place};
    ///
    /// let start = Place::current_location(DEFAULT_CURRENT_LOCATION);
    /// let end = NewPlace::new("Red Square", "", "Landmarks", Coord { x: 37.6208, y: 55.7539 })
    ///     .into_place(1);
    /// let route = NewRoute::between("Stroll", 9, &start, &end)?;
    /// assert_eq!(route.place_ids, vec![1]);
    /// assert_eq!(route.estimated_minutes, 3);
    /// # Ok::<(), waymark_core::RouteError>(())
    /// ```
    pub fn between(
        name: impl Into<String>,
        user_id: UserId,
        start: &Place,
        end: &Place,
    ) -> Result<Self, RouteError> {
        let route_name: String = name.into();
        if route_name.trim().is_empty() {
            return Err(RouteError::EmptyName);
        }

        let estimate = RouteEstimate::between(start.location, end.location);
        let place_ids = [start, end]
            .into_iter()
            .enumerate()
            .filter(|(position, place)| *position > 0 || place.is_persisted())
            .map(|(_, place)| place.id)
            .collect();

        Ok(Self::new(
            route_name,
            user_id,
            place_ids,
            estimate.distance_km,
            estimate.minutes,
        ))
    }

    /// Attach the identifier chosen by a store.
    #[must_use]
    pub fn into_route(self, id: RouteId) -> Route {
        Route {
            id,
            name: self.name,
            user_id: self.user_id,
            place_ids: self.place_ids,
            total_distance_km: self.total_distance_km,
            estimated_minutes: self.estimated_minutes,
            offline_available: false,
        }
    }
}
