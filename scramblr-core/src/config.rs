use crate::plan::NamingOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the optional per-directory config file.
pub const CONFIG_FILE_NAME: &str = ".scramblr.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Prefix used when none is given on the command line
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// First index handed out
    #[serde(default)]
    pub start_index: usize,

    /// Zero-pad indices to this many digits (0 = no padding)
    #[serde(default)]
    pub pad_width: usize,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            start_index: 0,
            pad_width: 0,
            use_color: None,
        }
    }
}

fn default_prefix() -> String {
    "image_".to_string()
}

impl Config {
    /// Load `.scramblr.toml` from the current directory if it exists.
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn naming(&self) -> NamingOptions {
        NamingOptions {
            start_index: self.defaults.start_index,
            pad_width: self.defaults.pad_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.prefix, "image_");
        assert_eq!(config.defaults.start_index, 0);
        assert_eq!(config.defaults.pad_width, 0);
        assert_eq!(config.defaults.use_color, None);
        assert_eq!(config.naming(), NamingOptions::default());
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
pad_width = 3
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.pad_width, 3);
        assert_eq!(config.defaults.prefix, "image_");
        assert_eq!(config.defaults.start_index, 0);
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            "[defaults]\nprefix = \"holiday_\"\nstart_index = 1\nuse_color = false\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.defaults.prefix, "holiday_");
        assert_eq!(config.defaults.use_color, Some(false));
        assert_eq!(
            config.naming(),
            NamingOptions {
                start_index: 1,
                pad_width: 0,
            }
        );
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[defaults\nprefix = 1").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
