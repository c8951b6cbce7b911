use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::schema::{Category, DEFAULT_CATEGORIES, STORAGE_KEY};

pub const SUPPORTED_LOCALES: [&str; 2] = ["ko", "en"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_locale() -> String {
    "ko".to_string()
}
fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashdeck")
        .to_string_lossy()
        .to_string()
}
fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}
fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            categories: default_categories(),
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Config {
    /// Read the user's config, writing the defaults on first run.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            let config = Config::default();
            if let Err(e) = config.save() {
                tracing::warn!(error = %e, path = %path.display(), "could not write default config");
            }
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flashdeck")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn category_set(&self) -> Vec<Category> {
        self.categories.iter().map(|c| Category::new(c.as_str())).collect()
    }

    /// Repair values a hand-edited config can get wrong: blank or duplicate
    /// categories, an unknown locale, an empty storage key.
    pub fn normalize(&mut self) {
        let mut seen = Vec::new();
        for name in self.categories.drain(..) {
            let name = name.trim().to_string();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.categories = if seen.is_empty() {
            default_categories()
        } else {
            seen
        };

        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            self.locale = default_locale();
        }
        if self.storage_key.trim().is_empty() {
            self.storage_key = default_storage_key();
        }
        if self.max_image_bytes == 0 {
            self.max_image_bytes = default_max_image_bytes();
        }
    }
}
