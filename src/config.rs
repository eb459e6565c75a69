use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::flatten::DEFAULT_SEPARATOR;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SparkConfig {
    /// Separator placed between key path segments
    pub separator: Option<String>,
    /// Log filter directive, e.g. `info` or `sparkdb=debug`
    pub log: Option<String>,
}

impl SparkConfig {
    /// Effective separator, falling back to `.`
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn validate(&self) -> Result<()> {
        if self.separator.as_deref().is_some_and(str::is_empty) {
            return Err(Error::Config("separator cannot be empty".to_string()));
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("sparkdb.toml")
}

/// Load the config file, returning `None` when it does not exist.
pub fn load_config(path: Option<&Path>) -> Result<Option<SparkConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SparkConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(Some(config))
}
