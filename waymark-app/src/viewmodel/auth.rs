use log::warn;
use waymark_core::User;

use super::error_text;
use crate::repository::UserRepository;

/// What the login screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUiState {
    /// An operation is in progress.
    pub is_loading: bool,
    /// A user is logged in.
    pub is_logged_in: bool,
    /// The logged-in user.
    pub current_user: Option<User>,
    /// Message from the last failed operation.
    pub error: Option<String>,
}

/// Login, registration and logout.
#[derive(Debug)]
pub struct AuthViewModel {
    users: UserRepository,
    state: AuthUiState,
}

impl AuthViewModel {
    /// Create the view model and restore any saved session.
    #[must_use]
    pub fn new(users: UserRepository) -> Self {
        let mut view_model = Self {
            users,
            state: AuthUiState {
                is_loading: true,
                ..AuthUiState::default()
            },
        };
        view_model.check_session();
        view_model
    }

    /// Current screen state.
    #[must_use]
    pub const fn state(&self) -> &AuthUiState {
        &self.state
    }

    fn check_session(&mut self) {
        match self.users.current_user() {
            Ok(user) => {
                self.state.is_logged_in = user.is_some();
                self.state.current_user = user;
                self.state.error = None;
            }
            Err(err) => {
                warn!("failed to restore session: {err}");
                self.state.error = error_text(&err);
            }
        }
        self.state.is_loading = false;
    }

    fn finish(&mut self, result: Result<User, crate::AuthError>) {
        match result {
            Ok(user) => {
                self.state.is_logged_in = true;
                self.state.current_user = Some(user);
                self.state.error = None;
            }
            Err(err) => self.state.error = error_text(&err),
        }
        self.state.is_loading = false;
    }

    /// Log in with `email` and `password`.
    pub fn login(&mut self, email: &str, password: &str) {
        self.state.is_loading = true;
        self.state.error = None;
        let result = self.users.login(email, password);
        self.finish(result);
    }

    /// Create an account and log it in.
    pub fn register(&mut self, email: &str, password: &str, username: &str) {
        self.state.is_loading = true;
        self.state.error = None;
        let result = self.users.register(email, password, username);
        self.finish(result);
    }

    /// Log out and reset the screen.
    pub fn logout(&mut self) {
        match self.users.logout() {
            Ok(()) => self.state = AuthUiState::default(),
            Err(err) => self.state.error = error_text(&err),
        }
    }
}
