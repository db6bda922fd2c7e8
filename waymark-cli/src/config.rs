//! Layered store options shared by every subcommand.

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waymark_app::AppConfig;
use waymark_app::container::{DEFAULT_DATABASE_FILE, DEFAULT_SESSION_FILE};

use crate::CliError;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_SESSION_FILE: &str = "session-file";
pub(crate) const ENV_DATABASE: &str = "WAYMARK_CMDS_STORE_DATABASE";
pub(crate) const ENV_SESSION_FILE: &str = "WAYMARK_CMDS_STORE_SESSION_FILE";

/// Locations of the database and session file.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "store",
    long_about = "Locate the guide's database and login session. Paths can \
                 come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Locate the database and session file"
)]
#[ortho_config(prefix = "WAYMARK")]
pub(crate) struct StoreArgs {
    /// Path to the SQLite database (created on first use).
    #[arg(long = ARG_DATABASE, value_name = "path", global = true)]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Path to the JSON file remembering the logged-in user.
    #[arg(long = ARG_SESSION_FILE, value_name = "path", global = true)]
    #[serde(default)]
    pub(crate) session_file: Option<Utf8PathBuf>,
}

impl StoreArgs {
    pub(crate) fn into_config(self) -> Result<AppConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(AppConfig::from(merged))
    }
}

/// The configured path, or `default` when neither the flag nor the
/// environment supplied one.
pub(crate) fn path_or_default(
    value: Option<Utf8PathBuf>,
    arg: &str,
    env: &str,
    default: &str,
) -> Utf8PathBuf {
    value.unwrap_or_else(|| {
        debug!("neither --{arg} nor {env} is set; using {default}");
        Utf8PathBuf::from(default)
    })
}

impl From<StoreArgs> for AppConfig {
    fn from(args: StoreArgs) -> Self {
        let database = path_or_default(
            args.database,
            ARG_DATABASE,
            ENV_DATABASE,
            DEFAULT_DATABASE_FILE,
        );
        let session_file = path_or_default(
            args.session_file,
            ARG_SESSION_FILE,
            ENV_SESSION_FILE,
            DEFAULT_SESSION_FILE,
        );
        Self::new(database, session_file)
    }
}
