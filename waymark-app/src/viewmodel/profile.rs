use waymark_core::User;

use super::error_text;
use crate::repository::UserRepository;

/// Message shown when no logged-in user can be found.
pub const USER_NOT_FOUND: &str = "user not found";

/// What the profile screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUiState {
    /// An operation is in progress.
    pub is_loading: bool,
    /// The logged-in user, without the password.
    pub user: Option<User>,
    /// Message from the last failed operation.
    pub error: Option<String>,
    /// Logout completed; the front end should return to the login screen.
    pub is_logged_out: bool,
}

/// The logged-in user's profile.
#[derive(Debug)]
pub struct ProfileViewModel {
    users: UserRepository,
    state: ProfileUiState,
}

impl ProfileViewModel {
    /// Create the view model and load the profile.
    #[must_use]
    pub fn new(users: UserRepository) -> Self {
        let mut view_model = Self {
            users,
            state: ProfileUiState::default(),
        };
        view_model.load_profile();
        view_model
    }

    /// Current screen state.
    #[must_use]
    pub const fn state(&self) -> &ProfileUiState {
        &self.state
    }

    fn stored_profile(&self) -> Result<Option<User>, crate::AuthError> {
        let Some(session) = self.users.session()? else {
            return Ok(None);
        };
        let user = self.users.user_by_id(session.user_id)?.map(|mut user| {
            user.password.clear();
            user
        });
        Ok(user)
    }

    fn load_profile(&mut self) {
        self.state.is_loading = true;
        match self.stored_profile() {
            Ok(Some(user)) => {
                self.state.user = Some(user);
                self.state.error = None;
            }
            Ok(None) => {
                self.state.user = None;
                self.state.error = Some(USER_NOT_FOUND.to_owned());
            }
            Err(err) => {
                self.state.user = None;
                self.state.error = error_text(&err);
            }
        }
        self.state.is_loading = false;
    }

    /// Load the profile again after a failure.
    pub fn retry_load_profile(&mut self) {
        self.load_profile();
    }

    /// Replace the user's preference string.
    pub fn update_preferences(&mut self, preferences: &str) {
        let Some(id) = self.state.user.as_ref().map(|user| user.id) else {
            self.state.error = Some(USER_NOT_FOUND.to_owned());
            return;
        };
        match self.users.update_preferences(id, preferences) {
            Ok(updated) => {
                if let Some(user) = self.state.user.as_mut() {
                    user.preferences = updated.preferences;
                }
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
    }

    /// Log out.
    pub fn logout(&mut self) {
        self.state.is_loading = true;
        match self.users.logout() {
            Ok(()) => self.state.is_logged_out = true,
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }
}
