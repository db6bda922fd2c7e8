//! Thin wrappers over the store traits used by the view models.
//!
//! Repositories add no caching. The user repository is the only one with
//! behaviour of its own: it checks registrations and keeps the session in
//! step with logins.

mod place;
mod route;
mod user;

pub use place::PlaceRepository;
pub use route::RouteRepository;
pub use user::{AuthError, UserRepository};
