use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;
use waymark_core::{NewUser, StoreError, User, UserId, UserStore, seed::default_user};

use crate::session::{Session, SessionError, SessionStore};

/// Errors raised by account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration used an email that already belongs to a user.
    #[error("a user with this email already exists")]
    AlreadyExists,
    /// No user matches the email and password.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The store declined to create the user.
    #[error("registration failed")]
    RegistrationFailed,
    /// The user record is missing.
    #[error("user {id} not found")]
    UserNotFound {
        /// Identifier that matched nothing.
        id: UserId,
    },
    /// The backing store failed.
    #[error("user store failed")]
    Store {
        /// Underlying store error.
        #[from]
        source: StoreError,
    },
    /// The session could not be read or written.
    #[error("session storage failed")]
    Session {
        /// Underlying session error.
        #[from]
        source: SessionError,
    },
}

/// Accounts and the login session.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore + Send + Sync>,
    session: Arc<dyn SessionStore + Send + Sync>,
}

impl std::fmt::Debug for UserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepository").finish_non_exhaustive()
    }
}

impl UserRepository {
    /// Combine a user store with the session store that remembers logins.
    #[must_use]
    pub fn new(
        store: Arc<dyn UserStore + Send + Sync>,
        session: Arc<dyn SessionStore + Send + Sync>,
    ) -> Self {
        Self { store, session }
    }

    /// Create an account and log it in.
    ///
    /// # Errors
    /// Returns [`AuthError::AlreadyExists`] without writing anything when the
    /// email is taken, and [`AuthError::RegistrationFailed`] when the store
    /// ignores the insert.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<User, AuthError> {
        if self.store.user_by_email(email)?.is_some() {
            debug!("registration rejected: {email} already registered");
            return Err(AuthError::AlreadyExists);
        }

        let new_user = NewUser::new(email, password, username);
        let Some(id) = self.store.insert_user(&new_user)? else {
            warn!("store ignored registration for {email}");
            return Err(AuthError::RegistrationFailed);
        };

        let user = new_user.into_user(id);
        self.session.save(&Session::for_user(&user))?;
        info!("registered user {id}");
        Ok(user)
    }

    /// Check credentials and remember the user as logged in.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] when nothing matches.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .user_by_credentials(email, password)?
            .ok_or(AuthError::InvalidCredentials)?;
        self.session.save(&Session::for_user(&user))?;
        info!("user {} logged in", user.id);
        Ok(user)
    }

    /// The saved session, if any.
    ///
    /// # Errors
    /// Returns [`AuthError::Session`] when the session cannot be read.
    pub fn session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.load()?)
    }

    /// The logged-in user as recorded in the session.
    ///
    /// The record carries no password and no preferences; use
    /// [`UserRepository::user_by_id`] for the stored row.
    ///
    /// # Errors
    /// Returns [`AuthError::Session`] when the session cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.session()?.map(Session::into_user))
    }

    /// Forget the logged-in user.
    ///
    /// # Errors
    /// Returns [`AuthError::Session`] when the session cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }

    /// A stored user, if present.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn user_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self.store.user_by_id(id)?)
    }

    /// Replace the preference string of a user.
    ///
    /// # Errors
    /// Returns [`AuthError::UserNotFound`] when the user does not exist.
    pub fn update_preferences(&self, id: UserId, preferences: &str) -> Result<User, AuthError> {
        let mut user = self
            .store
            .user_by_id(id)?
            .ok_or(AuthError::UserNotFound { id })?;
        preferences.clone_into(&mut user.preferences);
        self.store.update_user(&user)?;
        Ok(user)
    }

    /// Create the built-in account when no users exist.
    ///
    /// Returns `true` when the account was created.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn ensure_default_user(&self) -> Result<bool, AuthError> {
        if !self.store.all_users()?.is_empty() {
            return Ok(false);
        }
        let created = self.store.insert_user(&default_user())?.is_some();
        if created {
            info!("created default user account");
        }
        Ok(created)
    }
}
