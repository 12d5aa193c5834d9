//! User configuration for coderev.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/coderev/config.toml`, falling
//! back to `~/.config/coderev/config.toml`. Every key is optional:
//!
//! ```toml
//! theme = "catppuccin-mocha"   # or "dark"
//! syntax = "js"                # file extension used to highlight the editor
//! log_level = "debug"          # overridden by RUST_LOG
//! ```
//!
//! A missing file is not an error. An unreadable or malformed file is
//! reported and the defaults are used, so config problems never prevent
//! startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default theme name when the config does not set one.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";
/// Default highlighting syntax (file extension).
pub const DEFAULT_SYNTAX: &str = "js";

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in theme name, resolved by `Theme::from_name`.
    pub theme: String,
    /// File extension whose syntax definition highlights the editor buffer.
    pub syntax: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            syntax: DEFAULT_SYNTAX.to_owned(),
            log_level: None,
        }
    }
}

/// Failures while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read config {path:?}: {source}")]
    Read {
        /// Config file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has mistyped keys.
    #[error("invalid config {path:?}: {source}")]
    Parse {
        /// Config file location.
        path: PathBuf,
        /// TOML deserialisation failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Resolves an XDG base directory.
///
/// Uses `xdg` when set and non-empty, otherwise `$HOME/<home_fallback>`, and
/// finally the relative `home_fallback` itself when `HOME` is absent too.
pub fn xdg_dir(xdg: Option<String>, home: Option<String>, home_fallback: &str) -> PathBuf {
    xdg.filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(home_fallback)))
        .unwrap_or_else(|| PathBuf::from(home_fallback))
}

/// Returns the path to the coderev config file.
pub fn config_path() -> PathBuf {
    xdg_dir(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
        ".config",
    )
    .join("coderev")
    .join("config.toml")
}

impl Config {
    /// Loads the config at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        toml::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    /// Loads the config from the default location, falling back to defaults.
    ///
    /// The error, if any, is returned alongside the defaults so the caller can
    /// report it once logging is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::load_from(&config_path()) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
