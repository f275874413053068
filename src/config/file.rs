use crate::config::WatchConfig;
use crate::domain::model::CropRect;
use crate::utils::error::{Result, WatchError};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::Path;

/// TOML defaults for [`WatchConfig`]. Every field is optional; a present
/// value replaces the corresponding setting unless that setting was given
/// explicitly on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub data_url: Option<String>,
    pub summary_url: Option<String>,
    pub overview_url: Option<String>,
    /// Quoted string, e.g. release_at = "2024-05-27T15:46:00".
    pub release_at: Option<NaiveDateTime>,
    pub fire_early_secs: Option<f64>,
    pub freshness_days: Option<i64>,
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub crop: Option<CropRect>,
    pub zoom: Option<f32>,
    pub output_path: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WatchError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Merges the file into `config`. `set_on_cli` reports whether the named
    /// argument was passed explicitly; those settings are left untouched.
    pub fn apply<F>(self, config: &mut WatchConfig, set_on_cli: F)
    where
        F: Fn(&str) -> bool,
    {
        if let Some(value) = self.data_url {
            if !set_on_cli("data_url") {
                config.data_url = value;
            }
        }
        if let Some(value) = self.summary_url {
            if !set_on_cli("summary_url") {
                config.summary_url = value;
            }
        }
        if let Some(value) = self.overview_url {
            if !set_on_cli("overview_url") {
                config.overview_url = value;
            }
        }
        if let Some(value) = self.release_at {
            if !set_on_cli("release_at") {
                config.release_at = Some(value);
            }
        }
        if let Some(value) = self.fire_early_secs {
            if !set_on_cli("fire_early_secs") {
                config.fire_early_secs = value;
            }
        }
        if let Some(value) = self.freshness_days {
            if !set_on_cli("freshness_days") {
                config.freshness_days = value;
            }
        }
        if let Some(value) = self.max_attempts {
            if !set_on_cli("max_attempts") {
                config.max_attempts = value;
            }
        }
        if let Some(value) = self.retry_delay_ms {
            if !set_on_cli("retry_delay_ms") {
                config.retry_delay_ms = value;
            }
        }
        if let Some(value) = self.request_timeout_secs {
            if !set_on_cli("request_timeout_secs") {
                config.request_timeout_secs = value;
            }
        }
        if let Some(value) = self.crop {
            if !set_on_cli("crop") {
                config.crop = value;
            }
        }
        if let Some(value) = self.zoom {
            if !set_on_cli("zoom") {
                config.zoom = value;
            }
        }
        if let Some(value) = self.output_path {
            if !set_on_cli("output_path") {
                config.output_path = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str() {
        let config = FileConfig::from_toml_str(
            r#"
            release_at = "2024-05-27T15:46:00"
            freshness_days = 11
            zoom = 3.0
            crop = { x0 = 0.0, y0 = 0.0, x1 = 612.0, y1 = 225.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.freshness_days, Some(11));
        assert_eq!(config.zoom, Some(3.0));
        assert_eq!(config.crop.unwrap().x1, 612.0);
        assert!(config.release_at.is_some());
        assert!(config.data_url.is_none());
    }

    #[test]
    fn test_from_toml_str_rejects_garbage() {
        assert!(FileConfig::from_toml_str("freshness_days = [").is_err());
    }
}
