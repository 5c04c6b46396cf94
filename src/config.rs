use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::DurabilityPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrewgraphConfig {
    pub data_dir: Option<String>,
    pub durability: Option<DurabilityPolicy>,
}

impl BrewgraphConfig {
    /// Data directory, falling back to `data`
    pub fn data_dir_or_default(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("brewgraph.toml")
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BrewgraphConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BrewgraphConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BrewgraphConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
