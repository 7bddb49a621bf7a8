//! CLI command definitions and dispatch.
//!
//! Each subcommand lives in its own submodule:
//! - `publish`: full run, enrichment only, feed only
//! - `catalog`: read-only catalog inspection
//! - `settings`: config file management

mod catalog;
mod publish;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::config::{self, Config};

pub use catalog::cmd_pending;
pub use publish::{cmd_build, cmd_enrich, cmd_run};
pub use settings::cmd_init_config;

/// Conference talk podcast feed builder
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog database path (overrides the config file)
    #[arg(long, global = true, env = "CONFPOD_DB")]
    pub db: Option<PathBuf>,

    /// Feed output path (overrides the config file)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Enrich pending episodes, then rebuild the feed (default)
    Run,
    /// Enrich pending episodes without touching the feed
    Enrich,
    /// Rebuild the feed from the catalog as it stands
    Build,
    /// List episodes still missing a GUID, length or duration
    Pending,
    /// Write a config file containing the defaults
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the command named on the command line, or the full pipeline if none.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        None | Some(Commands::Run) => cmd_run(&runtime()?, &resolve_config(cli)?),
        Some(Commands::Enrich) => cmd_enrich(&runtime()?, &resolve_config(cli)?),
        Some(Commands::Build) => cmd_build(&runtime()?, &resolve_config(cli)?),
        Some(Commands::Pending) => cmd_pending(&runtime()?, &resolve_config(cli)?),
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_ref(), *force),
    }
}

/// Single-threaded runtime; every stage awaits the previous one.
fn runtime() -> anyhow::Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// Load the config file and apply command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };
    Ok(apply_overrides(config, cli))
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(db) = &cli.db {
        config.catalog.db_path = db.clone();
    }
    if let Some(output) = &cli.output {
        config.feed.output_path = output.clone();
    }
    debug!(
        target: "confpod::cli",
        db = %config.catalog.db_path.display(),
        output = %config.feed.output_path.display(),
        "Resolved settings"
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_full_run() {
        let cli = Cli::try_parse_from(["confpod"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["confpod", "build", "--db", "talks.db", "-o", "out/feed.xml"])
                .unwrap();
        assert_eq!(cli.command, Some(Commands::Build));
        assert_eq!(cli.db, Some(PathBuf::from("talks.db")));
        assert_eq!(cli.output, Some(PathBuf::from("out/feed.xml")));
    }

    #[test]
    fn test_init_config_force() {
        let cli = Cli::try_parse_from(["confpod", "init-config", "--force"]).unwrap();
        assert_eq!(cli.command, Some(Commands::InitConfig { force: true }));
    }

    #[test]
    fn test_overrides_replace_config_paths() {
        let cli = Cli::try_parse_from(["confpod", "--db", "a.db", "--output", "b.xml"]).unwrap();
        let config = apply_overrides(Config::default(), &cli);
        assert_eq!(config.catalog.db_path, PathBuf::from("a.db"));
        assert_eq!(config.feed.output_path, PathBuf::from("b.xml"));
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli {
            config: None,
            db: None,
            output: None,
            command: None,
        };
        let config = apply_overrides(Config::default(), &cli);
        assert_eq!(config.catalog.db_path, PathBuf::from("podcast.db"));
        assert_eq!(
            config.feed.output_path,
            PathBuf::from("docs/podcast/en-us/feed.xml")
        );
    }

    #[test]
    fn test_explicit_config_must_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[catalog\n").unwrap();

        let cli = Cli {
            config: Some(path),
            db: None,
            output: None,
            command: None,
        };
        assert!(resolve_config(&cli).is_err());
    }
}
