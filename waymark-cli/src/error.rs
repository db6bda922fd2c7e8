//! Error types emitted by the Waymark CLI.

use std::sync::Arc;

use thiserror::Error;
use waymark_app::{AuthError, ContainerError};
use waymark_core::{PlaceId, RouteId, StoreError};

/// Errors emitted by the Waymark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The application state could not be opened.
    #[error(transparent)]
    Open(#[from] ContainerError),
    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An account operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The command needs a logged-in user.
    #[error("not logged in (run `waymark login` first)")]
    NotLoggedIn,
    /// The referenced place does not exist.
    #[error("place {id} not found")]
    PlaceNotFound { id: PlaceId },
    /// The referenced route does not exist or belongs to someone else.
    #[error("route {id} not found")]
    RouteNotFound { id: RouteId },
    /// A screen operation reported a failure.
    #[error("{action} failed: {message}")]
    Rejected {
        action: &'static str,
        message: String,
    },
    /// The web search link could not be built.
    #[error("failed to build web search link: {0}")]
    WebSearchUrl(#[from] url::ParseError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    /// Turn a screen's error text into a failure of `action`.
    pub(crate) fn check(action: &'static str, error: Option<&String>) -> Result<(), Self> {
        error.map_or(Ok(()), |message| {
            Err(Self::Rejected {
                action,
                message: message.clone(),
            })
        })
    }
}
