//! Loading of the TOML game configuration.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use simon_core::GameConfig;

/// Reads and parses the configuration stored at `path`.
pub(crate) fn load(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read game config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid game config at {}", path.display()))
}

fn parse(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("failed to parse game config toml contents")
}
