//! Route planning commands.

use std::io::Write;

use clap::Args;
use waymark_app::AppContainer;
use waymark_core::{DEFAULT_CURRENT_LOCATION, Place, PlaceId, Route, RouteId};

use crate::CliError;
use crate::account::require_session;
use crate::output::{place_line, route_line, write_json, write_line};

/// Arguments for `routes`.
#[derive(Debug, Clone, Args)]
pub(crate) struct RoutesArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for `route-create`.
#[derive(Debug, Clone, Args)]
pub(crate) struct RouteCreateArgs {
    /// Route name.
    #[arg(long, value_name = "name")]
    pub(crate) name: String,
    /// Destination place.
    #[arg(long, value_name = "place-id")]
    pub(crate) to: PlaceId,
    /// Start place; defaults to the current location.
    #[arg(long, value_name = "place-id")]
    pub(crate) from: Option<PlaceId>,
}

/// Arguments for commands addressing one route.
#[derive(Debug, Clone, Args)]
pub(crate) struct RouteIdArgs {
    /// Route identifier.
    pub(crate) id: RouteId,
}

/// Arguments for `route-offline`.
#[derive(Debug, Clone, Args)]
pub(crate) struct RouteOfflineArgs {
    /// Route identifier.
    pub(crate) id: RouteId,
    /// Drop the route from offline storage.
    #[arg(long)]
    pub(crate) disable: bool,
}

fn load_place(container: &AppContainer, id: PlaceId) -> Result<Place, CliError> {
    container
        .places()
        .place_by_id(id)?
        .ok_or(CliError::PlaceNotFound { id })
}

fn owned_route(container: &AppContainer, id: RouteId) -> Result<Route, CliError> {
    let session = require_session(container)?;
    container
        .routes()
        .route_by_id(id)?
        .filter(|route| route.user_id == session.user_id)
        .ok_or(CliError::RouteNotFound { id })
}

pub(crate) fn run_routes(
    container: &AppContainer,
    args: &RoutesArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let session = require_session(container)?;
    let view_model = container.routes_view_model(session.user_id);
    let state = view_model.state();
    CliError::check("listing routes", state.error.as_ref())?;

    if args.json {
        return write_json(writer, &state.routes);
    }
    if state.routes.is_empty() {
        return write_line(writer, "No routes yet.");
    }
    state
        .routes
        .iter()
        .try_for_each(|route| write_line(writer, route_line(route)))
}

pub(crate) fn run_route_create(
    container: &AppContainer,
    args: &RouteCreateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let session = require_session(container)?;
    let start = match args.from {
        Some(id) => load_place(container, id)?,
        None => Place::current_location(DEFAULT_CURRENT_LOCATION),
    };
    let end = load_place(container, args.to)?;

    let mut view_model = container.routes_view_model(session.user_id);
    let created = view_model.create_route(&args.name, &start, &end);
    let state = view_model.state();
    CliError::check("creating route", state.error.as_ref())?;
    let route = created
        .and(state.selected_route.as_ref())
        .ok_or(CliError::Rejected {
            action: "creating route",
            message: String::from("route was not stored"),
        })?;
    write_line(writer, format_args!("Created {}", route_line(route)))
}

pub(crate) fn run_route_show(
    container: &AppContainer,
    args: &RouteIdArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = owned_route(container, args.id)?;
    let mut view_model = container.routes_view_model(route.user_id);
    view_model.select_route(route.id);
    let state = view_model.state();
    CliError::check("loading route", state.error.as_ref())?;

    write_line(writer, route_line(&route))?;
    state
        .selected_route_places
        .iter()
        .enumerate()
        .try_for_each(|(position, place)| {
            write_line(writer, format_args!("  {}. {}", position + 1, place_line(place)))
        })
}

pub(crate) fn run_route_delete(
    container: &AppContainer,
    args: &RouteIdArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = owned_route(container, args.id)?;
    let mut view_model = container.routes_view_model(route.user_id);
    view_model.delete_route(route.id);
    CliError::check("deleting route", view_model.state().error.as_ref())?;
    write_line(writer, format_args!("Deleted route {}.", route.id))
}

pub(crate) fn run_route_offline(
    container: &AppContainer,
    args: &RouteOfflineArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = owned_route(container, args.id)?;
    let available = !args.disable;
    let mut view_model = container.routes_view_model(route.user_id);
    view_model.toggle_offline(route.id, available);
    CliError::check("updating route", view_model.state().error.as_ref())?;
    let status = if available { "kept" } else { "no longer kept" };
    write_line(
        writer,
        format_args!(
            "Route {} and its {} places are {status} offline.",
            route.id,
            route.place_ids.len()
        ),
    )
}
