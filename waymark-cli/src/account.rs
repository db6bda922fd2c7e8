//! Account and session commands.

use std::io::Write;

use clap::Args;
use waymark_app::{AppContainer, Session};

use crate::CliError;
use crate::output::write_line;

/// Arguments for `register`.
#[derive(Debug, Clone, Args)]
pub(crate) struct RegisterArgs {
    /// Login email; must not be registered yet.
    #[arg(long, value_name = "email")]
    pub(crate) email: String,
    /// Login password.
    #[arg(long, value_name = "password")]
    pub(crate) password: String,
    /// Display name.
    #[arg(long, value_name = "name")]
    pub(crate) username: String,
}

/// Arguments for `login`.
#[derive(Debug, Clone, Args)]
pub(crate) struct LoginArgs {
    /// Login email.
    #[arg(long, value_name = "email")]
    pub(crate) email: String,
    /// Login password.
    #[arg(long, value_name = "password")]
    pub(crate) password: String,
}

/// Arguments for `preferences`.
#[derive(Debug, Clone, Args)]
pub(crate) struct PreferencesArgs {
    /// New preference text; replaces the old one.
    pub(crate) preferences: String,
}

/// The saved session, or [`CliError::NotLoggedIn`].
pub(crate) fn require_session(container: &AppContainer) -> Result<Session, CliError> {
    container.users().session()?.ok_or(CliError::NotLoggedIn)
}

pub(crate) fn run_register(
    container: &AppContainer,
    args: &RegisterArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut view_model = container.auth_view_model();
    view_model.register(&args.email, &args.password, &args.username);
    let state = view_model.state();
    CliError::check("registration", state.error.as_ref())?;
    let name = state
        .current_user
        .as_ref()
        .map_or(args.username.as_str(), |user| user.username.as_str());
    write_line(writer, format_args!("Welcome, {name}! You are now logged in."))
}

pub(crate) fn run_login(
    container: &AppContainer,
    args: &LoginArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut view_model = container.auth_view_model();
    view_model.login(&args.email, &args.password);
    let state = view_model.state();
    CliError::check("login", state.error.as_ref())?;
    let user = state.current_user.as_ref().ok_or(CliError::NotLoggedIn)?;
    write_line(writer, format_args!("Logged in as {}.", user.username))
}

pub(crate) fn run_logout(container: &AppContainer, writer: &mut dyn Write) -> Result<(), CliError> {
    container.users().logout()?;
    write_line(writer, "Logged out.")
}

pub(crate) fn run_whoami(container: &AppContainer, writer: &mut dyn Write) -> Result<(), CliError> {
    require_session(container)?;
    let view_model = container.profile_view_model();
    let state = view_model.state();
    CliError::check("loading profile", state.error.as_ref())?;
    let user = state.user.as_ref().ok_or(CliError::NotLoggedIn)?;
    write_line(
        writer,
        format_args!("{} <{}> (user {})", user.username, user.email, user.id),
    )?;
    if !user.preferences.is_empty() {
        write_line(writer, format_args!("preferences: {}", user.preferences))?;
    }
    Ok(())
}

pub(crate) fn run_preferences(
    container: &AppContainer,
    args: &PreferencesArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let session = require_session(container)?;
    container
        .users()
        .update_preferences(session.user_id, &args.preferences)?;
    write_line(writer, "Preferences saved.")
}
