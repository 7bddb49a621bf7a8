//! Config file management.

use std::path::PathBuf;

use crate::config::{self, Config, ConfigError};

/// Write the default configuration to `path` (or the default location)
pub fn cmd_init_config(path: Option<&PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.clone(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to replace it)",
            path.display()
        );
    }

    config::save(&Config::default(), &path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
