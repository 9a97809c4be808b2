//! Config module.
//! Runtime settings for the diagram server: listen address, font assets and
//! the accepted board sizes.
//! Layers: built-in defaults, then an optional JSON file, then CLI flags
//! (applied by `main`). Every field is optional in the file.

use crate::fonts::FontFiles;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub listen: SocketAddr,
    /// Directory the font files are resolved against.
    pub asset_dir: PathBuf,
    pub fonts: FontFiles,
    /// Size used when a request does not give one.
    pub default_size: u32,
    /// Largest accepted size, inclusive.
    pub max_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 3000)),
            asset_dir: PathBuf::from("public"),
            fonts: FontFiles::default(),
            default_size: 800,
            max_size: 2000,
        }
    }
}

impl Config {
    /// Defaults overlaid with the JSON file at `path`, when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            bail!("max_size must be positive");
        }
        if self.default_size == 0 || self.default_size > self.max_size {
            bail!(
                "default_size {} must be between 1 and max_size {}",
                self.default_size,
                self.max_size
            );
        }
        Ok(())
    }
}
