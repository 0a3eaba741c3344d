//! Configuration file support for Hydro.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/hydro/config.toml`.
//! Every section is optional; missing keys fall back to defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `weather.api_key`
pub const WEATHER_API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub food: FoodConfig,
}

/// Weather provider configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_fallback_temperature")]
    pub fallback_temperature_c: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_weather_api_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            fallback_temperature_c: default_fallback_temperature(),
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Food facts provider configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodConfig {
    #[serde(default = "default_food_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            api_url: default_food_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FoodConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Default value functions
fn default_weather_api_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".into()
}

fn default_food_api_url() -> String {
    "https://world.openfoodfacts.org/cgi/search.pl".into()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_fallback_temperature() -> f64 {
    20.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("hydro").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the lookups cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.weather.timeout_secs == 0 {
            return Err(Error::Config("weather.timeout_secs must be positive".into()));
        }
        if self.food.timeout_secs == 0 {
            return Err(Error::Config("food.timeout_secs must be positive".into()));
        }
        if !self.weather.fallback_temperature_c.is_finite() {
            return Err(Error::Config(
                "weather.fallback_temperature_c must be a finite number".into(),
            ));
        }
        Ok(())
    }

    /// Apply environment overrides (currently only the weather API key)
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(WEATHER_API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.weather.api_key = Some(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.food.timeout_secs, 5);
        assert_eq!(config.weather.fallback_temperature_c, 20.0);
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[weather]
api_key = "secret"
timeout_secs = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("secret"));
        assert_eq!(config.weather.timeout(), Duration::from_secs(3));
        assert_eq!(config.weather.fallback_temperature_c, 20.0); // default
        assert!(config.food.api_url.contains("openfoodfacts"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml_str = r#"
[food]
timeout_secs = 0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.weather.fallback_temperature_c = 18.5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.weather.fallback_temperature_c, 18.5);
        assert_eq!(loaded.food.api_url, config.food.api_url);
    }
}
