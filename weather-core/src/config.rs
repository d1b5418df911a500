use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_PROVIDER_URL: &str = "http://api.weatherapi.com/v1/current.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_GRPC_ADDR: &str = "[::]:50051";
pub const DEFAULT_GRPC_WORKERS: usize = 10;

/// Process-wide settings, built once at startup and handed to each front end.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
/// grpc_addr = "[::]:50051"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WeatherAPI.com key. Optional so the REST server can still start without it.
    pub api_key: Option<String>,

    /// Provider "current weather" endpoint.
    pub provider_url: String,

    /// Deadline for each outbound provider call.
    pub timeout_secs: u64,

    pub rest_addr: String,
    pub grpc_addr: String,

    /// Maximum number of in-flight RPC calls.
    pub grpc_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            rest_addr: DEFAULT_REST_ADDR.to_string(),
            grpc_addr: DEFAULT_GRPC_ADDR.to_string(),
            grpc_workers: DEFAULT_GRPC_WORKERS,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply `WEATHER_*` environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)?.with_overrides(|name| std::env::var(name).ok())
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Overlay values from `lookup` (normally the process environment).
    /// Blank values are treated as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("WEATHER_API_KEY") {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = var("WEATHER_PROVIDER_URL") {
            self.provider_url = url;
        }
        if let Some(secs) = var("WEATHER_TIMEOUT_SECS") {
            self.timeout_secs = parse_var("WEATHER_TIMEOUT_SECS", &secs)?;
        }
        if let Some(addr) = var("WEATHER_REST_ADDR") {
            self.rest_addr = addr;
        }
        if let Some(addr) = var("WEATHER_GRPC_ADDR") {
            self.grpc_addr = addr;
        }
        if let Some(workers) = var("WEATHER_GRPC_WORKERS") {
            self.grpc_workers = parse_var("WEATHER_GRPC_WORKERS", &workers)?;
        }

        Ok(self)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-service", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {name}: {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.provider_url, DEFAULT_PROVIDER_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.grpc_addr, "[::]:50051");
        assert_eq!(cfg.grpc_workers, 10);
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };

        let cfg = cfg
            .with_overrides(env(&[
                ("WEATHER_API_KEY", "ENV_KEY"),
                ("WEATHER_TIMEOUT_SECS", "3"),
                ("WEATHER_GRPC_WORKERS", "4"),
            ]))
            .unwrap();

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.grpc_workers, 4);
        assert_eq!(cfg.rest_addr, DEFAULT_REST_ADDR);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };

        let cfg = cfg.with_overrides(env(&[("WEATHER_API_KEY", "   ")])).unwrap();

        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = Config::default()
            .with_overrides(env(&[("WEATHER_TIMEOUT_SECS", "soon")]))
            .unwrap_err();

        assert!(err.to_string().contains("WEATHER_TIMEOUT_SECS"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config {
            api_key: Some("  ".into()),
            ..Config::default()
        };
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("weather-core-no-such-dir/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = std::env::temp_dir().join(format!("weather-core-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key(" SECRET ".into());
        cfg.grpc_addr = "127.0.0.1:6000".into();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key(), Some("SECRET"));
        assert_eq!(loaded.grpc_addr, "127.0.0.1:6000");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str("api_key = \"K\"\n").unwrap();
        assert_eq!(cfg.api_key(), Some("K"));
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
