//! Facade crate for the Waymark travel guide.
//!
//! This crate re-exports the core domain types and exposes the SQLite store
//! and the application layer behind feature flags.

#![forbid(unsafe_code)]

pub use waymark_core::{
    CURRENT_LOCATION_ID, NewPlace, NewRoute, NewUser, Place, PlaceId, PlaceStore, Route,
    RouteError, RouteEstimate, RouteId, RouteStore, SearchOutcome, StoreError, User, UserId,
    UserStore, WEB_SEARCH_PLACE_ID, haversine_km, search_places, walking_minutes,
};

#[cfg(feature = "store-sqlite")]
pub use waymark_core::SqliteStore;

#[cfg(feature = "app")]
pub use waymark_app::{
    AppConfig, AppContainer, AuthError, ContainerError, FileSessionStore, Session, SessionStore,
};
