use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::ConfigError;

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Partial configuration as it appears in a TOML file or the environment.
///
/// Example TOML:
/// ```toml
/// maps_api_key = "..."
/// weather_api_key = "..."
/// weather_base_url = "https://api.openweathermap.org"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub maps_api_key: Option<String>,
    pub weather_api_key: Option<String>,
    pub geocoding_base_url: Option<String>,
    pub weather_base_url: Option<String>,
}

impl Settings {
    /// Read settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Collect settings through `var`, which maps an environment variable name
    /// to its value. Both the camelCase key names used by older deployments and
    /// the upper-case forms are accepted. Blank values count as unset.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| names
                .iter()
                .find_map(|name| var(*name).filter(|v| !v.trim().is_empty()));

        Self {
            maps_api_key: first(&["mapsApiKey", "MAPS_API_KEY"]),
            weather_api_key: first(&["weatherApiKey", "WEATHER_API_KEY"]),
            geocoding_base_url: first(&["GEOCODING_BASE_URL"]),
            weather_base_url: first(&["WEATHER_BASE_URL"]),
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Values present in `other` replace the ones in `self`.
    pub fn merge(self, other: Settings) -> Self {
        Self {
            maps_api_key: other.maps_api_key.or(self.maps_api_key),
            weather_api_key: other.weather_api_key.or(self.weather_api_key),
            geocoding_base_url: other.geocoding_base_url.or(self.geocoding_base_url),
            weather_base_url: other.weather_base_url.or(self.weather_base_url),
        }
    }
}

/// Validated configuration, built once at startup and shared by both providers.
#[derive(Debug, Clone)]
pub struct Config {
    pub maps_api_key: String,
    pub weather_api_key: String,
    pub geocoding_base_url: String,
    pub weather_base_url: String,
}

impl Config {
    /// Load the optional config file, apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        Self::try_from(file.merge(Settings::from_env()))
    }
}

impl TryFrom<Settings> for Config {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let maps_api_key = required(settings.maps_api_key, "maps_api_key")?;
        let weather_api_key = required(settings.weather_api_key, "weather_api_key")?;

        Ok(Self {
            maps_api_key,
            weather_api_key,
            geocoding_base_url: base_url(settings.geocoding_base_url, DEFAULT_GEOCODING_BASE_URL),
            weather_base_url: base_url(settings.weather_base_url, DEFAULT_WEATHER_BASE_URL),
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingKey(name))
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_camel_case_and_upper_case_keys() {
        let settings = Settings::from_vars(vars(&[
            ("mapsApiKey", "MAPS"),
            ("WEATHER_API_KEY", "WEATHER"),
        ]));

        assert_eq!(settings.maps_api_key.as_deref(), Some("MAPS"));
        assert_eq!(settings.weather_api_key.as_deref(), Some("WEATHER"));
        assert!(settings.geocoding_base_url.is_none());
    }

    #[test]
    fn missing_key_fails_fast() {
        let settings = Settings::from_vars(vars(&[("mapsApiKey", "MAPS")]));
        let err = Config::try_from(settings).unwrap_err();

        assert!(matches!(err, ConfigError::MissingKey("weather_api_key")));
        assert!(err.to_string().contains("weather_api_key"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let settings = Settings::from_vars(vars(&[
            ("mapsApiKey", "   "),
            ("weatherApiKey", "WEATHER"),
        ]));
        let err = Config::try_from(settings).unwrap_err();

        assert!(matches!(err, ConfigError::MissingKey("maps_api_key")));
    }

    #[test]
    fn defaults_base_urls_and_strips_trailing_slash() {
        let settings = Settings::from_vars(vars(&[
            ("mapsApiKey", "MAPS"),
            ("weatherApiKey", "WEATHER"),
            ("WEATHER_BASE_URL", "http://127.0.0.1:9000/"),
        ]));
        let cfg = Config::try_from(settings).expect("config must be valid");

        assert_eq!(cfg.geocoding_base_url, DEFAULT_GEOCODING_BASE_URL);
        assert_eq!(cfg.weather_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn environment_overrides_file_values() {
        let file: Settings = toml::from_str(
            r#"
            maps_api_key = "FILE_MAPS"
            weather_api_key = "FILE_WEATHER"
            "#,
        )
        .expect("valid toml");
        let env = Settings::from_vars(vars(&[("weatherApiKey", "ENV_WEATHER")]));

        let cfg = Config::try_from(file.merge(env)).expect("config must be valid");

        assert_eq!(cfg.maps_api_key, "FILE_MAPS");
        assert_eq!(cfg.weather_api_key, "ENV_WEATHER");
    }

    #[test]
    fn blank_environment_value_does_not_shadow_configured_key() {
        let file: Settings = toml::from_str(
            r#"
            maps_api_key = "FILE_MAPS"
            weather_api_key = "FILE_WEATHER"
            "#,
        )
        .expect("valid toml");
        let env = Settings::from_vars(vars(&[
            ("mapsApiKey", ""),
            ("weatherApiKey", "  "),
            ("WEATHER_API_KEY", "ENV_WEATHER"),
        ]));

        let cfg = Config::try_from(file.merge(env)).expect("config must be valid");

        assert_eq!(cfg.maps_api_key, "FILE_MAPS");
        assert_eq!(cfg.weather_api_key, "ENV_WEATHER");
    }

    #[test]
    fn unreadable_file_is_reported_with_path() {
        let err = Settings::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
