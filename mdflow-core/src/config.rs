//! Configuration management for mdflow

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeVariant,
    pub render: RenderConfig,
    pub update: UpdateConfig,
    #[cfg(feature = "watch")]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeVariant {
    Dark,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of rendered blocks kept in the node view cache.
    /// Must be at least 1.
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Quiescence window for streaming updates: a re-render happens only
    /// after this many milliseconds without a new content push.
    pub debounce_ms: u64,
}

#[cfg(feature = "watch")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Dark,
            render: RenderConfig::default(),
            update: UpdateConfig::default(),
            #[cfg(feature = "watch")]
            watch: WatchConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 128,
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

#[cfg(feature = "watch")]
impl Default for WatchConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdflow")
            .map(|proj_dirs| proj_dirs.config_dir().join("mdflow.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the rest of the system cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.render.cache_capacity == 0 {
            anyhow::bail!("render.cache_capacity must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert_eq!(config.render.cache_capacity, 128);
        assert_eq!(config.update.debounce_ms, 300);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_valid_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let mut toml_content = String::from(
            "theme = \"Light\"\n\
\n\
[render]\n\
cache_capacity = 16\n\
\n\
[update]\n\
debounce_ms = 150\n",
        );

        if cfg!(feature = "watch") {
            toml_content.push_str("\n[watch]\nenabled = false\n");
        }

        file.write_all(toml_content.as_bytes())?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Light);
        assert_eq!(config.render.cache_capacity, 16);
        assert_eq!(config.update.debounce_ms, 150);

        Ok(())
    }

    #[test]
    fn test_load_partial_toml_fills_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"theme = \"Light\"\n")?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Light);
        assert_eq!(config.render.cache_capacity, 128);
        assert_eq!(config.update.debounce_ms, 300);

        Ok(())
    }

    #[test]
    fn test_zero_cache_capacity_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[render]\ncache_capacity = 0\n").unwrap();

        let result = Config::load_from(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"invalid toml [[[syntax").unwrap();

        let result = Config::load_from(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_some() {
        let path = Config::config_path();
        assert!(path.is_some());
        if let Some(p) = path {
            assert!(p.to_string_lossy().ends_with("mdflow.toml"));
        }
    }

    #[test]
    fn test_theme_variant_serialization() -> Result<()> {
        let config = Config {
            theme: ThemeVariant::Light,
            ..Default::default()
        };

        let toml_str = toml::to_string(&config)?;
        assert!(toml_str.contains("Light"));

        let parsed: Config = toml::from_str(&toml_str)?;
        assert_eq!(parsed.theme, ThemeVariant::Light);

        Ok(())
    }
}
