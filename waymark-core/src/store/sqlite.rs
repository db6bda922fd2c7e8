//! SQLite-backed implementation of the store traits.

use std::{
    fmt,
    sync::{Mutex, MutexGuard},
};

use camino::{Utf8Path, Utf8PathBuf};
use geo::{Coord, Rect};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, Params, Row, params};

use crate::seed::launch_catalogue;
use crate::{NewPlace, NewRoute, NewUser, Place, PlaceId, Route, RouteId, User, UserId};

use super::schema::{PLACE_COLUMNS, ROUTE_COLUMNS, USER_COLUMNS, create_schema};
use super::{PlaceStore, RouteStore, StoreError, UserStore};

/// Local database holding users, places and routes.
///
/// Opening a database that has no `places` table yet writes the launch
/// catalogue. The connection sits behind a mutex so the store can be shared
/// between threads; every operation holds the lock for its duration.
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// Missing parent directories are created and the schema is initialised
    /// if absent.
    ///
    /// # Errors
    /// Returns [`StoreError::CreateDirectory`] or [`StoreError::OpenDatabase`]
    /// when the file cannot be reached, and [`StoreError::Query`] when the
    /// schema cannot be created.
    pub fn open(path: &Utf8Path) -> Result<Self, StoreError> {
        waymark_fs::ensure_parent_dir(path).map_err(|source| StoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| StoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        let store = Self::initialise(connection)?;
        info!("opened waymark store at {path}");
        Ok(store)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// Fails when SQLite cannot allocate the database or create the schema.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| StoreError::OpenDatabase {
                path: Utf8PathBuf::from(":memory:"),
                source,
            })?;
        Self::initialise(connection)
    }

    fn initialise(mut connection: Connection) -> Result<Self, StoreError> {
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(query_error("enable foreign keys"))?;

        let transaction = connection
            .transaction()
            .map_err(query_error("begin schema transaction"))?;
        if create_schema(&transaction)? {
            let catalogue = launch_catalogue();
            for place in &catalogue {
                insert_place_row(&transaction, place)?;
            }
            info!("seeded {} launch places", catalogue.len());
        }
        transaction
            .commit()
            .map_err(query_error("commit schema transaction"))?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn query_error(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> StoreError {
    move |source| StoreError::Query { operation, source }
}

fn ensure_changed(changed: usize, entity: &'static str, id: i64) -> Result<(), StoreError> {
    if changed == 0 {
        return Err(StoreError::NotFound { entity, id });
    }
    Ok(())
}

fn query_all<T, P, F>(
    connection: &Connection,
    sql: &str,
    params: P,
    map: F,
    operation: &'static str,
) -> Result<Vec<T>, StoreError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut statement = connection.prepare(sql).map_err(query_error(operation))?;
    let rows = statement
        .query_map(params, map)
        .map_err(query_error(operation))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(query_error(operation))
}

fn query_one<T, P, F>(
    connection: &Connection,
    sql: &str,
    params: P,
    map: F,
    operation: &'static str,
) -> Result<Option<T>, StoreError>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    connection
        .query_row(sql, params, map)
        .optional()
        .map_err(query_error(operation))
}

// Places

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    let rating: f64 = row.get(7)?;
    Ok(Place {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        location: Coord {
            x: row.get(4)?,
            y: row.get(5)?,
        },
        image_url: row.get(6)?,
        rating: narrow_rating(rating),
        favorite: row.get(8)?,
        offline_available: row.get(9)?,
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "ratings are written from f32 values"
)]
const fn narrow_rating(rating: f64) -> f32 {
    rating as f32
}

fn insert_place_row(connection: &Connection, place: &NewPlace) -> Result<PlaceId, StoreError> {
    connection
        .execute(
            "INSERT INTO places (name, description, category, lon, lat, image_url, rating, \
             is_favorite, is_offline_available) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                place.name,
                place.description,
                place.category,
                place.location.x,
                place.location.y,
                place.image_url,
                f64::from(place.rating),
                place.favorite,
                place.offline_available,
            ],
        )
        .map_err(query_error("insert place"))?;
    Ok(connection.last_insert_rowid())
}

fn select_places<P: Params>(
    connection: &Connection,
    filter: &str,
    params: P,
    operation: &'static str,
) -> Result<Vec<Place>, StoreError> {
    let sql = format!("SELECT {PLACE_COLUMNS} FROM places {filter} ORDER BY id");
    query_all(connection, &sql, params, place_from_row, operation)
}

impl PlaceStore for SqliteStore {
    fn insert_place(&self, place: &NewPlace) -> Result<PlaceId, StoreError> {
        let connection = self.lock()?;
        insert_place_row(&connection, place)
    }

    fn insert_places(&self, places: &[NewPlace]) -> Result<Vec<PlaceId>, StoreError> {
        let mut connection = self.lock()?;
        let transaction = connection
            .transaction()
            .map_err(query_error("begin place import"))?;
        let ids = places
            .iter()
            .map(|place| insert_place_row(&transaction, place))
            .collect::<Result<Vec<_>, _>>()?;
        transaction
            .commit()
            .map_err(query_error("commit place import"))?;
        debug!("inserted {} places", ids.len());
        Ok(ids)
    }

    fn update_place(&self, place: &Place) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let changed = connection
            .execute(
                "UPDATE places SET name = ?2, description = ?3, category = ?4, lon = ?5, \
                 lat = ?6, image_url = ?7, rating = ?8, is_favorite = ?9, \
                 is_offline_available = ?10 WHERE id = ?1",
                params![
                    place.id,
                    place.name,
                    place.description,
                    place.category,
                    place.location.x,
                    place.location.y,
                    place.image_url,
                    f64::from(place.rating),
                    place.favorite,
                    place.offline_available,
                ],
            )
            .map_err(query_error("update place"))?;
        ensure_changed(changed, "place", place.id)
    }

    fn all_places(&self) -> Result<Vec<Place>, StoreError> {
        let connection = self.lock()?;
        select_places(&connection, "", [], "list places")
    }

    fn place_by_id(&self, id: PlaceId) -> Result<Option<Place>, StoreError> {
        let connection = self.lock()?;
        let sql = format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = ?1");
        query_one(&connection, &sql, [id], place_from_row, "load place")
    }

    fn places_by_category(&self, category: &str) -> Result<Vec<Place>, StoreError> {
        let connection = self.lock()?;
        select_places(
            &connection,
            "WHERE category = ?1",
            [category],
            "list places by category",
        )
    }

    fn favorite_places(&self) -> Result<Vec<Place>, StoreError> {
        let connection = self.lock()?;
        select_places(
            &connection,
            "WHERE is_favorite = 1",
            [],
            "list favorite places",
        )
    }

    fn offline_places(&self) -> Result<Vec<Place>, StoreError> {
        let connection = self.lock()?;
        select_places(
            &connection,
            "WHERE is_offline_available = 1",
            [],
            "list offline places",
        )
    }

    fn set_favorite(&self, id: PlaceId, favorite: bool) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let changed = connection
            .execute(
                "UPDATE places SET is_favorite = ?2 WHERE id = ?1",
                params![id, favorite],
            )
            .map_err(query_error("update favorite flag"))?;
        ensure_changed(changed, "place", id)
    }

    fn set_offline_available(&self, id: PlaceId, available: bool) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let changed = connection
            .execute(
                "UPDATE places SET is_offline_available = ?2 WHERE id = ?1",
                params![id, available],
            )
            .map_err(query_error("update place offline flag"))?;
        ensure_changed(changed, "place", id)
    }

    fn places_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<Place>, StoreError> {
        let connection = self.lock()?;
        let (min, max) = (bbox.min(), bbox.max());
        select_places(
            &connection,
            "WHERE lon BETWEEN ?1 AND ?2 AND lat BETWEEN ?3 AND ?4",
            params![min.x, max.x, min.y, max.y],
            "list places in bounding box",
        )
    }
}

// Routes

struct RouteRow {
    id: RouteId,
    name: String,
    user_id: UserId,
    place_ids: String,
    total_distance_km: f64,
    estimated_minutes: u32,
    offline_available: bool,
}

impl RouteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            user_id: row.get(2)?,
            place_ids: row.get(3)?,
            total_distance_km: row.get(4)?,
            estimated_minutes: row.get(5)?,
            offline_available: row.get(6)?,
        })
    }

    fn decode(self) -> Result<Route, StoreError> {
        let place_ids = serde_json::from_str(&self.place_ids).map_err(|source| {
            StoreError::DecodePlaceIds {
                route_id: self.id,
                source,
            }
        })?;
        Ok(Route {
            id: self.id,
            name: self.name,
            user_id: self.user_id,
            place_ids,
            total_distance_km: self.total_distance_km,
            estimated_minutes: self.estimated_minutes,
            offline_available: self.offline_available,
        })
    }
}

fn encode_place_ids(route_name: &str, place_ids: &[PlaceId]) -> Result<String, StoreError> {
    serde_json::to_string(place_ids).map_err(|source| StoreError::EncodePlaceIds {
        route_name: route_name.to_owned(),
        source,
    })
}

fn select_routes<P: Params>(
    connection: &Connection,
    filter: &str,
    params: P,
    operation: &'static str,
) -> Result<Vec<Route>, StoreError> {
    let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes {filter} ORDER BY id");
    query_all(connection, &sql, params, RouteRow::from_row, operation)?
        .into_iter()
        .map(RouteRow::decode)
        .collect()
}

impl RouteStore for SqliteStore {
    fn insert_route(&self, route: &NewRoute) -> Result<RouteId, StoreError> {
        let place_ids = encode_place_ids(&route.name, &route.place_ids)?;
        let connection = self.lock()?;
        connection
            .execute(
                "INSERT INTO routes (name, user_id, place_ids, total_distance, estimated_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    route.name,
                    route.user_id,
                    place_ids,
                    route.total_distance_km,
                    route.estimated_minutes,
                ],
            )
            .map_err(query_error("insert route"))?;
        Ok(connection.last_insert_rowid())
    }

    fn update_route(&self, route: &Route) -> Result<(), StoreError> {
        let place_ids = encode_place_ids(&route.name, &route.place_ids)?;
        let connection = self.lock()?;
        let changed = connection
            .execute(
                "UPDATE routes SET name = ?2, user_id = ?3, place_ids = ?4, total_distance = ?5, \
                 estimated_time = ?6, is_offline_available = ?7 WHERE id = ?1",
                params![
                    route.id,
                    route.name,
                    route.user_id,
                    place_ids,
                    route.total_distance_km,
                    route.estimated_minutes,
                    route.offline_available,
                ],
            )
            .map_err(query_error("update route"))?;
        ensure_changed(changed, "route", route.id)
    }

    fn routes_for_user(&self, user_id: UserId) -> Result<Vec<Route>, StoreError> {
        let connection = self.lock()?;
        select_routes(
            &connection,
            "WHERE user_id = ?1",
            [user_id],
            "list routes for user",
        )
    }

    fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        let connection = self.lock()?;
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = ?1");
        query_one(&connection, &sql, [id], RouteRow::from_row, "load route")?
            .map(RouteRow::decode)
            .transpose()
    }

    fn delete_route(&self, id: RouteId) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let removed = connection
            .execute("DELETE FROM routes WHERE id = ?1", [id])
            .map_err(query_error("delete route"))?;
        if removed == 0 {
            debug!("route {id} was already absent");
        }
        Ok(())
    }

    fn set_route_offline_available(
        &self,
        id: RouteId,
        available: bool,
    ) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let changed = connection
            .execute(
                "UPDATE routes SET is_offline_available = ?2 WHERE id = ?1",
                params![id, available],
            )
            .map_err(query_error("update route offline flag"))?;
        ensure_changed(changed, "route", id)
    }

    fn offline_routes(&self) -> Result<Vec<Route>, StoreError> {
        let connection = self.lock()?;
        select_routes(
            &connection,
            "WHERE is_offline_available = 1",
            [],
            "list offline routes",
        )
    }
}

// Users

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        username: row.get(3)?,
        preferences: row.get(4)?,
    })
}

impl UserStore for SqliteStore {
    fn insert_user(&self, user: &NewUser) -> Result<Option<UserId>, StoreError> {
        let connection = self.lock()?;
        let inserted = connection
            .execute(
                "INSERT OR IGNORE INTO users (email, password, username) VALUES (?1, ?2, ?3)",
                params![user.email, user.password, user.username],
            )
            .map_err(query_error("insert user"))?;
        if inserted == 0 {
            debug!("ignored duplicate registration for {}", user.email);
            return Ok(None);
        }
        Ok(Some(connection.last_insert_rowid()))
    }

    fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let connection = self.lock()?;
        let changed = connection
            .execute(
                "UPDATE users SET email = ?2, password = ?3, username = ?4, preferences = ?5 \
                 WHERE id = ?1",
                params![
                    user.id,
                    user.email,
                    user.password,
                    user.username,
                    user.preferences,
                ],
            )
            .map_err(query_error("update user"))?;
        ensure_changed(changed, "user", user.id)
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let connection = self.lock()?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 LIMIT 1");
        query_one(&connection, &sql, [email], user_from_row, "load user by email")
    }

    fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let connection = self.lock()?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        query_one(&connection, &sql, [id], user_from_row, "load user")
    }

    fn user_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let connection = self.lock()?;
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 AND password = ?2 LIMIT 1");
        query_one(
            &connection,
            &sql,
            [email, password],
            user_from_row,
            "check credentials",
        )
    }

    fn all_users(&self) -> Result<Vec<User>, StoreError> {
        let connection = self.lock()?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        query_all(&connection, &sql, [], user_from_row, "list users")
    }
}
