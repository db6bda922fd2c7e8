//! Core domain types for the Waymark travel guide.
//!
//! The crate holds the three persisted records ([`Place`], [`Route`],
//! [`User`]), the walking estimate used when planning a route, the local
//! place search, and the store traits the application layer builds on. A
//! SQLite-backed implementation of every store trait lives behind the
//! `store-sqlite` feature.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use waymark_core::{RouteEstimate, walking_minutes};
//!
//! let red_square = Coord { x: 37.6208, y: 55.7539 };
//! let bolshoi = Coord { x: 37.6186, y: 55.7602 };
//! let estimate = RouteEstimate::between(red_square, bolshoi);
//! assert!(estimate.distance_km < 1.0);
//! assert_eq!(walking_minutes(5.0), 60);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod estimate;
pub mod place;
pub mod route;
pub mod search;
pub mod seed;
pub mod store;
pub mod user;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use estimate::{
    EARTH_RADIUS_KM, RouteEstimate, WALKING_SPEED_KMH, haversine_km, walking_minutes,
};
pub use place::{CURRENT_LOCATION_ID, DEFAULT_CURRENT_LOCATION, NewPlace, Place, PlaceId};
pub use route::{NewRoute, Route, RouteError, RouteId};
pub use search::{
    MIN_LOCAL_RESULTS, SearchOutcome, WEB_SEARCH_PLACE_ID, filter_places, is_web_search_place,
    search_places, web_search_place, web_search_url,
};
pub use store::{PlaceStore, RouteStore, StoreError, UserStore};
pub use user::{NewUser, User, UserId};

#[cfg(feature = "store-sqlite")]
pub use store::SqliteStore;
