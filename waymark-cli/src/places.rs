//! Place browsing commands.

use std::io::Write;

use clap::Args;
use waymark_app::AppContainer;
use waymark_core::{PlaceId, web_search_url};

use crate::CliError;
use crate::output::{place_line, write_json, write_line, write_places};

/// Arguments for `places`.
#[derive(Debug, Clone, Args)]
pub(crate) struct PlacesArgs {
    /// Only places in this category (exact match).
    #[arg(long, value_name = "name")]
    pub(crate) category: Option<String>,
    /// Only favorite places.
    #[arg(long)]
    pub(crate) favorites: bool,
    /// Only places kept for offline use.
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for `search`.
#[derive(Debug, Clone, Args)]
pub(crate) struct SearchArgs {
    /// Text to look for.
    pub(crate) query: String,
    /// Print JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for `place`.
#[derive(Debug, Clone, Args)]
pub(crate) struct PlaceArgs {
    /// Place identifier.
    pub(crate) id: PlaceId,
}

/// Arguments for `favorite`.
#[derive(Debug, Clone, Args)]
pub(crate) struct FavoriteArgs {
    /// Place identifier.
    pub(crate) id: PlaceId,
    /// Unmark instead of mark.
    #[arg(long)]
    pub(crate) remove: bool,
}

/// Arguments for `offline`.
#[derive(Debug, Clone, Args)]
pub(crate) struct OfflineArgs {
    /// Place identifier.
    pub(crate) id: PlaceId,
    /// Drop the place from offline storage.
    #[arg(long)]
    pub(crate) disable: bool,
}

pub(crate) fn run_places(
    container: &AppContainer,
    args: &PlacesArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut view_model = container.places_view_model();
    view_model.filter_by_category(args.category.as_deref());
    let state = view_model.state();
    CliError::check("listing places", state.error.as_ref())?;

    let places: Vec<_> = state
        .filtered_places
        .iter()
        .filter(|place| !args.favorites || place.favorite)
        .filter(|place| !args.offline || place.offline_available)
        .cloned()
        .collect();
    if args.json {
        write_json(writer, &places)
    } else {
        write_places(writer, &places)
    }
}

pub(crate) fn run_search(
    container: &AppContainer,
    args: &SearchArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut view_model = container.map_view_model();
    view_model.search(&args.query);
    let state = view_model.state();
    CliError::check("searching places", state.error.as_ref())?;

    if args.json {
        return write_json(writer, &state.search_results);
    }
    for place in &state.search_results {
        if waymark_core::is_web_search_place(place) {
            let url = match &state.web_search_url {
                Some(url) => url.clone(),
                None => web_search_url(&args.query)?,
            };
            write_line(writer, format_args!("{}: {url}", place.name))?;
        } else {
            write_line(writer, place_line(place))?;
        }
    }
    Ok(())
}

pub(crate) fn run_place(
    container: &AppContainer,
    args: &PlaceArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let place = container
        .places()
        .place_by_id(args.id)?
        .ok_or(CliError::PlaceNotFound { id: args.id })?;
    write_line(writer, place_line(&place))?;
    write_line(writer, &place.description)?;
    write_line(
        writer,
        format_args!("at {:.4}, {:.4}", place.latitude(), place.longitude()),
    )?;
    if let Some(image_url) = &place.image_url {
        write_line(writer, format_args!("picture: {image_url}"))?;
    }
    Ok(())
}

pub(crate) fn run_favorite(
    container: &AppContainer,
    args: &FavoriteArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let favorite = !args.remove;
    container.places().toggle_favorite(args.id, favorite)?;
    let verb = if favorite { "Added" } else { "Removed" };
    let direction = if favorite { "to" } else { "from" };
    write_line(writer, format_args!("{verb} place {} {direction} favorites.", args.id))
}

pub(crate) fn run_offline(
    container: &AppContainer,
    args: &OfflineArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let available = !args.disable;
    container.places().toggle_offline(args.id, available)?;
    let status = if available { "kept" } else { "no longer kept" };
    write_line(writer, format_args!("Place {} is {status} offline.", args.id))
}

pub(crate) fn run_seed(container: &AppContainer, writer: &mut dyn Write) -> Result<(), CliError> {
    let inserted = container.places().load_predefined_places()?;
    write_line(writer, format_args!("Installed {inserted} predefined places."))
}
