//! Table layout for the SQLite store.

use rusqlite::{OptionalExtension, Transaction};

use super::StoreError;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    username TEXT NOT NULL,
    preferences TEXT NOT NULL DEFAULT ''
)";

const CREATE_PLACES: &str = "CREATE TABLE IF NOT EXISTS places (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    lon REAL NOT NULL,
    lat REAL NOT NULL,
    image_url TEXT,
    rating REAL NOT NULL DEFAULT 0,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    is_offline_available INTEGER NOT NULL DEFAULT 0
)";

const CREATE_PLACES_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS places_category ON places (category)";

const CREATE_ROUTES: &str = "CREATE TABLE IF NOT EXISTS routes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    place_ids TEXT NOT NULL,
    total_distance REAL NOT NULL,
    estimated_time INTEGER NOT NULL,
    is_offline_available INTEGER NOT NULL DEFAULT 0
)";

const CREATE_ROUTES_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS routes_user ON routes (user_id)";

/// Column list shared by every place query.
pub(super) const PLACE_COLUMNS: &str =
    "id, name, description, category, lon, lat, image_url, rating, is_favorite, is_offline_available";

/// Column list shared by every route query.
pub(super) const ROUTE_COLUMNS: &str =
    "id, name, user_id, place_ids, total_distance, estimated_time, is_offline_available";

/// Column list shared by every user query.
pub(super) const USER_COLUMNS: &str = "id, email, password, username, preferences";

/// Create any missing tables and indices.
///
/// Returns `true` when the `places` table did not exist beforehand, which
/// signals that the launch catalogue should be written.
pub(super) fn create_schema(transaction: &Transaction<'_>) -> Result<bool, StoreError> {
    let places_existed = transaction
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'places'",
            [],
            |_| Ok(()),
        )
        .optional()
        .map_err(|source| StoreError::Query {
            operation: "inspect existing schema",
            source,
        })?
        .is_some();

    for statement in [
        CREATE_USERS,
        CREATE_PLACES,
        CREATE_PLACES_CATEGORY_INDEX,
        CREATE_ROUTES,
        CREATE_ROUTES_USER_INDEX,
    ] {
        transaction
            .execute(statement, [])
            .map_err(|source| StoreError::Query {
                operation: "create schema",
                source,
            })?;
    }

    Ok(!places_existed)
}
