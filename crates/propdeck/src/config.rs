use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "propdeck";

/// Fallback back office when neither the config file nor `--base-url` names
/// one.
pub const DEFAULT_BASE_URL: &str = "https://proposals.example.se/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// "cascade" plays the full entrance choreography, "none" switches
    /// slides instantly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `propdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Propdeck configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn base_url(&self) -> &str {
        self.api
            .as_ref()
            .and_then(|api| api.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.transition" => {
                match value {
                    "cascade" | "none" => {}
                    _ => anyhow::bail!(
                        "Invalid transition: {value}. Must be 'cascade' or 'none'."
                    ),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .transition = Some(value.to_string());
            }
            "api.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!("Invalid base URL: {value}. Must start with http:// or https://.");
                }
                self.api.get_or_insert_with(ApiConfig::default).base_url =
                    Some(value.trim_end_matches('/').to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.transition, api.base_url"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_theme_accepts_known_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(config.defaults.unwrap().theme.as_deref(), Some("dark"));
    }

    #[test]
    fn set_theme_rejects_unknown_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "sepia").is_err());
    }

    #[test]
    fn set_transition_validates() {
        let mut config = Config::default();
        config.set("defaults.transition", "none").unwrap();
        assert!(config.set("defaults.transition", "spin").is_err());
    }

    #[test]
    fn set_base_url_requires_a_scheme_and_trims_the_slash() {
        let mut config = Config::default();
        assert!(config.set("api.base_url", "proposals.example.se").is_err());
        config
            .set("api.base_url", "https://proposals.example.se/api/")
            .unwrap();
        assert_eq!(config.base_url(), "https://proposals.example.se/api");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut config = Config::default();
        assert!(config.set("defaults.aspect", "16:9").is_err());
    }

    #[test]
    fn base_url_falls_back_to_the_default() {
        assert_eq!(Config::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn roundtrips_through_yaml() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("api.base_url", "https://internal.example.se").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.defaults.as_ref().unwrap().theme.as_deref(), Some("dark"));
        assert_eq!(back.base_url(), "https://internal.example.se");
    }
}
