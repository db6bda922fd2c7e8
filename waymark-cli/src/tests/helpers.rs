//! Test helpers running commands against a temporary data directory.

use super::*;
use camino::Utf8PathBuf;
use tempfile::TempDir;

pub(super) struct Workspace {
    _dir: TempDir,
    config: AppConfig,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self {
            config: AppConfig::in_dir(&root),
            _dir: dir,
        }
    }

    /// Parse `args` as a command line and run it, returning stdout.
    pub(super) fn run(&self, args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("waymark").chain(args.iter().copied()))
            .map_err(CliError::ArgumentParsing)?;
        let mut output = Vec::new();
        run_command(&self.config, cli.command, &mut output)?;
        Ok(String::from_utf8(output).expect("utf-8 output"))
    }

    pub(super) fn run_ok(&self, args: &[&str]) -> String {
        self.run(args)
            .unwrap_or_else(|err| panic!("`{}` failed: {err}", args.join(" ")))
    }

    pub(super) fn login_default_user(&self) {
        self.run_ok(&["login", "--email", "user@example.com", "--password", "password"]);
    }
}
