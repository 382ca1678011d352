use anyhow::{Context, Result};
use engine::{COMMON_KEYS, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

#[cfg(windows)]
pub fn config_dir() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("refactor-toolbox")
}

#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
        .join("refactor-toolbox")
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn default_visible_keys() -> Vec<String> {
    COMMON_KEYS.iter().map(|k| k.to_string()).collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Keys shown by default when present in a tree.
    #[serde(default = "default_visible_keys")]
    pub visible_keys: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            visible_keys: default_visible_keys(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TraversalConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    /// Default parser id per language name.
    #[serde(default)]
    pub parsers: HashMap<String, String>,
    #[serde(default)]
    pub traversal: TraversalConfig,
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path())
}

/// Missing files yield the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    } else {
        Ok(Config::default())
    }
}
