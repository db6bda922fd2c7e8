//! Command-line front end for the Waymark travel guide.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use log::debug;
use waymark_app::{AppConfig, AppContainer};

mod account;
mod config;
mod error;
mod output;
mod places;
mod routes;

pub use error::CliError;

use account::{LoginArgs, PreferencesArgs, RegisterArgs};
use config::StoreArgs;
use places::{FavoriteArgs, OfflineArgs, PlaceArgs, PlacesArgs, SearchArgs};
use routes::{RouteCreateArgs, RouteIdArgs, RouteOfflineArgs, RoutesArgs};

/// Run the Waymark CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let config = cli.store.into_config()?;
    let mut stdout = std::io::stdout().lock();
    run_command(&config, cli.command, &mut stdout)
}

fn run_command(
    config: &AppConfig,
    command: Command,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    debug!("opening application state at {}", config.database_path);
    let container = AppContainer::open(config)?;
    match command {
        Command::Places(args) => places::run_places(&container, &args, writer),
        Command::Search(args) => places::run_search(&container, &args, writer),
        Command::Place(args) => places::run_place(&container, &args, writer),
        Command::Favorite(args) => places::run_favorite(&container, &args, writer),
        Command::Offline(args) => places::run_offline(&container, &args, writer),
        Command::Seed => places::run_seed(&container, writer),
        Command::Register(args) => account::run_register(&container, &args, writer),
        Command::Login(args) => account::run_login(&container, &args, writer),
        Command::Logout => account::run_logout(&container, writer),
        Command::Whoami => account::run_whoami(&container, writer),
        Command::Preferences(args) => account::run_preferences(&container, &args, writer),
        Command::Routes(args) => routes::run_routes(&container, &args, writer),
        Command::RouteCreate(args) => routes::run_route_create(&container, &args, writer),
        Command::RouteShow(args) => routes::run_route_show(&container, &args, writer),
        Command::RouteDelete(args) => routes::run_route_delete(&container, &args, writer),
        Command::RouteOffline(args) => routes::run_route_offline(&container, &args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    about = "Browse places, keep favorites and plan walking routes",
    version
)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List places, optionally filtered.
    Places(PlacesArgs),
    /// Search places by name, description or category.
    Search(SearchArgs),
    /// Show one place.
    Place(PlaceArgs),
    /// Mark or unmark a place as a favorite.
    Favorite(FavoriteArgs),
    /// Keep or drop a place for offline use.
    Offline(OfflineArgs),
    /// Install the curated places with ratings and pictures.
    Seed,
    /// Create an account and log in.
    Register(RegisterArgs),
    /// Log in to an existing account.
    Login(LoginArgs),
    /// Forget the logged-in user.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Replace the logged-in user's preferences.
    Preferences(PreferencesArgs),
    /// List the logged-in user's routes.
    Routes(RoutesArgs),
    /// Plan and store a walking route.
    RouteCreate(RouteCreateArgs),
    /// Show a route and its places.
    RouteShow(RouteIdArgs),
    /// Delete a route.
    RouteDelete(RouteIdArgs),
    /// Keep or drop a route and its places for offline use.
    RouteOffline(RouteOfflineArgs),
}

#[cfg(test)]
mod tests;
