//! Application layer of the Waymark travel guide.
//!
//! Repositories wrap the store traits from `waymark-core`, the session store
//! remembers the logged-in user, and view models hold the state of each
//! screen. [`AppContainer`] wires them together over a SQLite database.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use waymark_app::{AppConfig, AppContainer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let container = AppContainer::open(&AppConfig::in_dir(Utf8Path::new("state")))?;
//! let mut places = container.places_view_model();
//! places.filter_by_category(Some("Museums"));
//! for place in &places.state().filtered_places {
//!     println!("{}", place.name);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod container;
pub mod repository;
pub mod session;
pub mod viewmodel;

pub use container::{AppConfig, AppContainer, ContainerError};
pub use repository::{AuthError, PlaceRepository, RouteRepository, UserRepository};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
pub use viewmodel::{
    AuthUiState, AuthViewModel, FavoritesUiState, FavoritesViewModel, MapUiState, MapViewModel,
    PlacesUiState, PlacesViewModel, ProfileUiState, ProfileViewModel, RoutesUiState,
    RoutesViewModel,
};
