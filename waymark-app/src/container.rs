//! Wiring of stores, repositories and view models.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use thiserror::Error;
use waymark_core::{PlaceStore, RouteStore, SqliteStore, StoreError, UserId, UserStore};

use crate::repository::{AuthError, PlaceRepository, RouteRepository, UserRepository};
use crate::session::{FileSessionStore, SessionStore};
use crate::viewmodel::{
    AuthViewModel, FavoritesViewModel, MapViewModel, PlacesViewModel, ProfileViewModel,
    RoutesViewModel,
};

/// File name of the database inside a data directory.
pub const DEFAULT_DATABASE_FILE: &str = "waymark.db";

/// File name of the session document inside a data directory.
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Where the application keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub database_path: Utf8PathBuf,
    /// JSON session file.
    pub session_path: Utf8PathBuf,
}

impl AppConfig {
    /// Use explicit file locations.
    #[must_use]
    pub fn new(
        database_path: impl Into<Utf8PathBuf>,
        session_path: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            database_path: database_path.into(),
            session_path: session_path.into(),
        }
    }

    /// Keep both files under `dir` with their default names.
    #[must_use]
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self::new(dir.join(DEFAULT_DATABASE_FILE), dir.join(DEFAULT_SESSION_FILE))
    }
}

/// Errors raised while starting the application.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The database could not be opened.
    #[error("failed to open database")]
    OpenStore {
        /// Underlying store error.
        #[from]
        source: StoreError,
    },
    /// The built-in account could not be created.
    #[error("failed to prepare default account")]
    DefaultUser {
        /// Underlying account error.
        #[from]
        source: AuthError,
    },
}

/// Shared handles for every screen of the application.
#[derive(Debug, Clone)]
pub struct AppContainer {
    places: PlaceRepository,
    routes: RouteRepository,
    users: UserRepository,
}

impl AppContainer {
    /// Open the database and session file named by `config`.
    ///
    /// The built-in account is created when no user exists yet.
    ///
    /// # Errors
    /// Returns [`ContainerError`] when the database cannot be opened or the
    /// built-in account cannot be written.
    pub fn open(config: &AppConfig) -> Result<Self, ContainerError> {
        let store = Arc::new(SqliteStore::open(&config.database_path)?);
        let session = Arc::new(FileSessionStore::new(config.session_path.clone()));
        let container = Self::from_parts(store, session)?;
        info!(
            "application ready (database {}, session {})",
            config.database_path, config.session_path
        );
        Ok(container)
    }

    /// Build a container over existing stores.
    ///
    /// # Errors
    /// Returns [`ContainerError::DefaultUser`] when the built-in account
    /// cannot be written.
    pub fn from_parts<S>(
        store: Arc<S>,
        session: Arc<dyn SessionStore + Send + Sync>,
    ) -> Result<Self, ContainerError>
    where
        S: PlaceStore + RouteStore + UserStore + Send + Sync + 'static,
    {
        let users = UserRepository::new(store.clone(), session);
        users.ensure_default_user()?;
        Ok(Self {
            places: PlaceRepository::new(store.clone()),
            routes: RouteRepository::new(store),
            users,
        })
    }

    /// Place access.
    #[must_use]
    pub const fn places(&self) -> &PlaceRepository {
        &self.places
    }

    /// Route access.
    #[must_use]
    pub const fn routes(&self) -> &RouteRepository {
        &self.routes
    }

    /// Account and session access.
    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Login screen.
    #[must_use]
    pub fn auth_view_model(&self) -> AuthViewModel {
        AuthViewModel::new(self.users.clone())
    }

    /// Place list screen.
    #[must_use]
    pub fn places_view_model(&self) -> PlacesViewModel {
        PlacesViewModel::new(self.places.clone())
    }

    /// Favorites screen.
    #[must_use]
    pub fn favorites_view_model(&self) -> FavoritesViewModel {
        FavoritesViewModel::new(self.places.clone())
    }

    /// Map screen.
    #[must_use]
    pub fn map_view_model(&self) -> MapViewModel {
        MapViewModel::new(self.places.clone())
    }

    /// Profile screen.
    #[must_use]
    pub fn profile_view_model(&self) -> ProfileViewModel {
        ProfileViewModel::new(self.users.clone())
    }

    /// Routes screen for `user_id`.
    #[must_use]
    pub fn routes_view_model(&self, user_id: UserId) -> RoutesViewModel {
        RoutesViewModel::new(self.routes.clone(), self.places.clone(), user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn open_prepares_seeded_store_and_default_user() {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        let container = AppContainer::open(&AppConfig::in_dir(&root)).expect("open container");

        assert_eq!(container.places().all_places().expect("places").len(), 10);
        let user = container
            .users()
            .login("user@example.com", "password")
            .expect("default login");
        assert_eq!(
            container.auth_view_model().state().current_user.as_ref().map(|u| u.id),
            Some(user.id)
        );
    }

    #[rstest]
    fn config_in_dir_uses_default_names() {
        let config = AppConfig::in_dir(Utf8Path::new("/var/lib/waymark"));
        assert_eq!(config.database_path.as_str(), "/var/lib/waymark/waymark.db");
        assert_eq!(config.session_path.as_str(), "/var/lib/waymark/session.json");
    }
}
