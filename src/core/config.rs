use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::providers::Provider;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_color() -> String {
    "auto".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            color: default_color(),
        }
    }
}

/// One billing export source: a provider plus where its CSV lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Default CSV path used when the command line gives none.
    pub export_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            sources: Provider::all()
                .iter()
                .map(|p| SourceConfig {
                    id: p.id().to_string(),
                    enabled: true,
                    export_path: None,
                })
                .collect(),
        }
    }
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("costlens").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Serialize and write this config to the config file path.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Enable or disable a source, adding it if the config predates it.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(source) = self.sources.iter_mut().find(|s| s.id == id) {
            source.enabled = enabled;
            return;
        }
        self.sources.push(SourceConfig {
            id: id.to_string(),
            enabled,
            export_path: None,
        });
    }

    /// Configured default export path for a provider, if any.
    pub fn export_path_for(&self, provider: Provider) -> Option<PathBuf> {
        self.sources
            .iter()
            .find(|s| s.enabled && s.id == provider.id())
            .and_then(|s| s.export_path.clone())
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !["text", "json"].contains(&self.settings.default_format.as_str()) {
            issues.push(format!(
                "Invalid default_format: '{}' (must be 'text' or 'json')",
                self.settings.default_format
            ));
        }
        if !["auto", "always", "never"].contains(&self.settings.color.as_str()) {
            issues.push(format!(
                "Invalid color: '{}' (must be 'auto', 'always', or 'never')",
                self.settings.color
            ));
        }
        for source in &self.sources {
            if Provider::from_id(&source.id).is_none() {
                issues.push(format!("Unknown provider ID: '{}'", source.id));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let issues = config.validate();
        assert!(issues.is_empty(), "default config should be valid, got: {:?}", issues);
    }

    #[test]
    fn default_sources_cover_all_providers() {
        let config = AppConfig::default();
        for provider in Provider::all() {
            assert!(config.sources.iter().any(|s| s.id == provider.id()));
        }
    }

    #[test]
    fn validate_catches_invalid_format() {
        let mut config = AppConfig::default();
        config.settings.default_format = "xml".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("default_format")));
    }

    #[test]
    fn validate_catches_invalid_color() {
        let mut config = AppConfig::default();
        config.settings.color = "blue".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("color")));
    }

    #[test]
    fn validate_catches_unknown_provider_id() {
        let mut config = AppConfig::default();
        config.sources.push(SourceConfig {
            id: "azure".to_string(),
            enabled: true,
            export_path: None,
        });
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("Unknown provider")));
    }

    #[test]
    fn set_enabled_flips_existing_source() {
        let mut config = AppConfig::default();
        config.set_enabled("gcp", false);
        let gcp = config.sources.iter().find(|s| s.id == "gcp").unwrap();
        assert!(!gcp.enabled);
        assert_eq!(config.sources.len(), Provider::all().len());
    }

    #[test]
    fn export_path_ignores_disabled_sources() {
        let mut config = AppConfig::default();
        config.sources[0].export_path = Some(PathBuf::from("/data/aws.csv"));
        config.sources[0].enabled = false;
        assert_eq!(config.export_path_for(Provider::Aws), None);
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[settings]
default_format = "json"
color = "always"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.default_format, "json");
        assert_eq!(config.settings.color, "always");
        assert!(config.sources.is_empty());
    }

    #[test]
    fn parse_source_toml() {
        let toml = r#"
[[sources]]
id = "aws"
export_path = "/exports/aws_line_items.csv"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sources.len(), 1);
        assert!(config.sources[0].enabled);
        assert_eq!(
            config.export_path_for(Provider::Aws),
            Some(PathBuf::from("/exports/aws_line_items.csv"))
        );
    }

    #[test]
    fn parse_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.settings.default_format, "text");
        assert_eq!(config.settings.color, "auto");
    }
}
