//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\confpod\config.toml
//! - macOS: ~/Library/Application Support/confpod/config.toml
//! - Linux: ~/.config/confpod/config.toml
//!
//! A different file can be named with `--config`. Every section falls back
//! to its defaults, which reproduce the published feed's channel metadata.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog location
    pub catalog: CatalogConfig,

    /// Audio download settings
    pub fetch: FetchConfig,

    /// Feed output and channel metadata
    pub feed: FeedConfig,
}

/// Catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// SQLite catalog file
    pub db_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(crate::db::DEFAULT_DB_NAME),
        }
    }
}

/// Audio download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Seconds allowed to establish a connection
    pub connect_timeout_secs: u64,

    /// Seconds allowed for a whole download
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("confpod/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 30,
            timeout_secs: 600,
        }
    }
}

/// Feed output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Where the rendered feed is written (overwritten on every run)
    pub output_path: PathBuf,

    /// Channel-level metadata
    pub channel: ChannelConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("docs/podcast/en-us/feed.xml"),
            channel: ChannelConfig::default(),
        }
    }
}

/// Channel-level feed metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    /// Generator identity string
    pub generator: String,
    /// RSS format documentation URL
    pub docs: String,
    /// Cover art URL (itunes:image)
    pub image_url: String,
    pub author: String,
    pub explicit: bool,
    /// "episodic" or "serial"
    pub show_type: String,
    /// Top-level iTunes category
    pub category: String,
    /// Nested iTunes subcategory; empty for none
    pub subcategory: String,
    pub location: LocationConfig,
}

const BASE_ADDR: &str = "https://github.com/jaydenmilne/general-pod";

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: "General Conference (Unofficial)".to_string(),
            link: "https://generalpod.jayd.ml".to_string(),
            description: "The unofficial podcast feed for talks from the General Conference \
                of the Church of Jesus Christ of Latter Day Saints. This podcast is \
                unaffiliated with the Church of Jesus Christ of Latter Day Saints."
                .to_string(),
            language: "en-us".to_string(),
            generator: BASE_ADDR.to_string(),
            docs: "https://www.rssboard.org/rss-specification".to_string(),
            image_url: format!("{}/docs/assets/en-us/itunes_image.jpg", BASE_ADDR),
            author: "Jayden Milne".to_string(),
            explicit: false,
            show_type: "episodic".to_string(),
            category: "Religion & Spirituality".to_string(),
            subcategory: "Christianity".to_string(),
            location: LocationConfig::default(),
        }
    }
}

/// Geographic location tag (podcast:location)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub name: String,
    /// geo: URI
    pub geo: String,
    /// OpenStreetMap identifier
    pub osm: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: "Conference Center".to_string(),
            geo: "geo:40.7725,-111.8925".to_string(),
            osm: "R6146196".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("confpod"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicitly named file.
///
/// Unlike [`load`], a missing or malformed file is an error: the caller
/// asked for this file specifically.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to `path`.
///
/// Creates the parent directory if it doesn't exist.
pub fn save(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
