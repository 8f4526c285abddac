use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Suffix shown after every amount.
    pub(crate) currency: String,
    /// Categories offered when adding an expense.
    pub(crate) categories: Vec<String>,
    /// Overrides the default database location.
    pub(crate) database: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "lei".into(),
            categories: [
                "Food",
                "Transport",
                "Utilities",
                "Rent",
                "Health",
                "Shopping",
                "Entertainment",
                "Other",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            database: None,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)?;
        config.categories = config
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if config.categories.is_empty() {
            config.categories = Self::default().categories;
        }
        Ok(config)
    }
}
