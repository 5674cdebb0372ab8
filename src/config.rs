// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file (the
//! explicit path, else `config.toml` in the platform config directory),
//! then `POSGRAPH_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Topology file loaded when none is given on the command line
    pub topology: Option<PathBuf>,
    /// First code handed out by the registry's allocator
    pub first_code: u32,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topology: None,
            first_code: 1,
            log_level: "info".to_string(),
        }
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "posgraph")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from disk and environment, falling back to defaults
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder();

    match path {
        // An explicit file must exist
        Some(path) => {
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }
        None => {
            if let Some(path) = default_path() {
                builder = builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Toml)
                        .required(false),
                );
            }
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("POSGRAPH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let settings = builder.build().context("Failed to read configuration")?;
    settings
        .try_deserialize()
        .context("Failed to parse configuration")
}
