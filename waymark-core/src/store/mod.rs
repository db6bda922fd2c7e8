//! Data access traits for places, routes and users.
//!
//! Each trait mirrors one table of the local database. Implementations are
//! plain accessors: they add no caching and no referential checks between
//! records. List queries return rows in ascending identifier order.

use geo::Rect;

use crate::{NewPlace, NewRoute, NewUser, Place, PlaceId, Route, RouteId, User, UserId};

mod error;
#[cfg(feature = "store-sqlite")]
mod schema;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use error::StoreError;
#[cfg(feature = "store-sqlite")]
pub use sqlite::SqliteStore;

/// Read/write access to persisted places.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use waymark_core::{NewPlace, PlaceStore, SqliteStore};
///
/// # fn main() -> Result<(), waymark_core::StoreError> {
/// let store = SqliteStore::open_in_memory()?;
/// let id = store.insert_place(&NewPlace::new(
///     "Bolshoi Theatre",
///     "Opera and ballet",
///     "Theatres",
///     Coord { x: 37.6186, y: 55.7602 },
/// ))?;
/// store.set_favorite(id, true)?;
///
/// let favorites = store.favorite_places()?;
/// assert_eq!(favorites.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait PlaceStore {
    /// Store a new place and return its identifier.
    fn insert_place(&self, place: &NewPlace) -> Result<PlaceId, StoreError>;

    /// Store several places at once, returning identifiers in input order.
    fn insert_places(&self, places: &[NewPlace]) -> Result<Vec<PlaceId>, StoreError>;

    /// Replace every field of an existing place.
    ///
    /// Returns [`StoreError::NotFound`] when no place has `place.id`.
    fn update_place(&self, place: &Place) -> Result<(), StoreError>;

    /// All stored places.
    fn all_places(&self) -> Result<Vec<Place>, StoreError>;

    /// A single place, if present.
    fn place_by_id(&self, id: PlaceId) -> Result<Option<Place>, StoreError>;

    /// Places whose category equals `category` exactly.
    fn places_by_category(&self, category: &str) -> Result<Vec<Place>, StoreError>;

    /// Places marked as favorites.
    fn favorite_places(&self) -> Result<Vec<Place>, StoreError>;

    /// Places kept for offline use.
    fn offline_places(&self) -> Result<Vec<Place>, StoreError>;

    /// Set the favorite flag of a place.
    fn set_favorite(&self, id: PlaceId, favorite: bool) -> Result<(), StoreError>;

    /// Set the offline flag of a place.
    fn set_offline_available(&self, id: PlaceId, available: bool) -> Result<(), StoreError>;

    /// Places inside `bbox`, boundary included.
    ///
    /// The rectangle uses WGS84 (`x = longitude`, `y = latitude`). Regions
    /// crossing the antimeridian must be split by the caller.
    fn places_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<Place>, StoreError>;
}

/// Read/write access to persisted routes.
pub trait RouteStore {
    /// Store a new route and return its identifier.
    fn insert_route(&self, route: &NewRoute) -> Result<RouteId, StoreError>;

    /// Replace every field of an existing route.
    fn update_route(&self, route: &Route) -> Result<(), StoreError>;

    /// Routes owned by `user_id`.
    fn routes_for_user(&self, user_id: UserId) -> Result<Vec<Route>, StoreError>;

    /// A single route, if present.
    fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError>;

    /// Delete a route. Deleting a missing route is not an error.
    fn delete_route(&self, id: RouteId) -> Result<(), StoreError>;

    /// Set the offline flag of a route.
    fn set_route_offline_available(&self, id: RouteId, available: bool)
    -> Result<(), StoreError>;

    /// Routes kept for offline use, across all users.
    fn offline_routes(&self) -> Result<Vec<Route>, StoreError>;
}

/// Read/write access to registered users.
pub trait UserStore {
    /// Store a new user.
    ///
    /// Returns `Ok(None)` without writing when the email is already taken.
    fn insert_user(&self, user: &NewUser) -> Result<Option<UserId>, StoreError>;

    /// Replace every field of an existing user.
    fn update_user(&self, user: &User) -> Result<(), StoreError>;

    /// The user registered with `email`, if any.
    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// A single user, if present.
    fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// The user whose email and password both match.
    fn user_by_credentials(&self, email: &str, password: &str)
    -> Result<Option<User>, StoreError>;

    /// All registered users.
    fn all_users(&self) -> Result<Vec<User>, StoreError>;
}
