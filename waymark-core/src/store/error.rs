use thiserror::Error;

#[cfg(feature = "store-sqlite")]
use camino::Utf8PathBuf;

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating the directory that holds the database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Location of the database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A statement failed to prepare or execute.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Serialising a route's place list failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to encode place ids for route {route_name:?}")]
    EncodePlaceIds {
        /// Name of the route being written.
        route_name: String,
        /// JSON encoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored place list could not be decoded.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to decode place ids for route {route_id}")]
    DecodePlaceIds {
        /// Identifier of the affected route.
        route_id: i64,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// An update targeted a record that does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record, e.g. `place`.
        entity: &'static str,
        /// Identifier that matched nothing.
        id: i64,
    },
    /// A previous writer panicked while holding the store lock.
    #[error("store lock poisoned by an earlier failure")]
    Poisoned,
}
