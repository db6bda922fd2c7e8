//! Registered users.

/// Identifier assigned to a user by the store.
pub type UserId = i64;

/// A registered account.
///
/// The password is stored as entered; sessions never persist it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Login email; unique across users.
    pub email: String,
    /// Login secret.
    pub password: String,
    /// Display name.
    pub username: String,
    /// Free-form preference string.
    pub preferences: String,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Login secret.
    pub password: String,
    /// Display name.
    pub username: String,
}

impl NewUser {
    /// Construct a registration record with empty preferences.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            username: username.into(),
        }
    }

    /// Attach the identifier chosen by a store.
    ///
    /// # Examples
    /// ```
    /// use waymark_core::NewUser;
    ///
    /// let user = NewUser::new("ann@example.com", "secret", "Ann").into_user(3);
    /// assert_eq!(user.id, 3);
    /// assert!(user.preferences.is_empty());
    /// ```
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            username: self.username,
            preferences: String::new(),
        }
    }
}
