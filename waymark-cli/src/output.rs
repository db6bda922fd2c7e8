//! Text and JSON rendering of command results.

use std::{fmt::Display, io::Write};

use serde::Serialize;
use waymark_core::{Place, Route};

use crate::CliError;

pub(crate) fn write_line(writer: &mut dyn Write, line: impl Display) -> Result<(), CliError> {
    writeln!(writer, "{line}").map_err(CliError::WriteOutput)
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *writer, value).map_err(CliError::SerializeOutput)?;
    writeln!(writer).map_err(CliError::WriteOutput)
}

pub(crate) fn place_line(place: &Place) -> String {
    let mut line = format!("#{} {} ({})", place.id, place.name, place.category);
    if place.rating > 0.0 {
        line.push_str(&format!(" {:.1}/5", place.rating));
    }
    if place.favorite {
        line.push_str(" [favorite]");
    }
    if place.offline_available {
        line.push_str(" [offline]");
    }
    line
}

pub(crate) fn route_line(route: &Route) -> String {
    let mut line = format!(
        "#{} {}: {:.2} km, {} min",
        route.id, route.name, route.total_distance_km, route.estimated_minutes
    );
    if route.offline_available {
        line.push_str(" [offline]");
    }
    line
}

pub(crate) fn write_places(writer: &mut dyn Write, places: &[Place]) -> Result<(), CliError> {
    if places.is_empty() {
        return write_line(writer, "No places found.");
    }
    places
        .iter()
        .try_for_each(|place| write_line(writer, place_line(place)))
}
