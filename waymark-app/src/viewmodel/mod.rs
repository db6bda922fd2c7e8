//! Screen state holders.
//!
//! Each view model owns the repositories it needs and a `*UiState` value
//! that a front end renders. Operations run to completion before returning
//! and record failures as display text in the state instead of returning
//! them.

use std::fmt::Display;

mod auth;
mod favorites;
mod map;
mod places;
mod profile;
mod routes;

pub use auth::{AuthUiState, AuthViewModel};
pub use favorites::{FavoritesUiState, FavoritesViewModel};
pub use map::{MapUiState, MapViewModel};
pub use places::{PlacesUiState, PlacesViewModel};
pub use profile::{ProfileUiState, ProfileViewModel, USER_NOT_FOUND};
pub use routes::{RoutesUiState, RoutesViewModel};

fn error_text(err: &impl Display) -> Option<String> {
    Some(err.to_string())
}

fn update_matching<T>(items: &mut [T], matches: impl Fn(&T) -> bool, update: impl Fn(&mut T)) {
    items
        .iter_mut()
        .filter(|item| matches(item))
        .for_each(update);
}
