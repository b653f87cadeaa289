use jyotish::ephemeris::EphemerisSettings;
use jyotish::vedic::dashas::{DashaOptions, DEFAULT_HORIZON_YEAR};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "JYOTIPATH_CONFIG";

/// Relative locations tried when `JYOTIPATH_CONFIG` is not set.
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["configs/jyotipath.toml", "../../configs/jyotipath.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dasha: DashaSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub ephemeris: EphemerisSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashaSettings {
    #[serde(default = "default_horizon_year")]
    pub horizon_year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_horizon_year() -> i32 {
    DEFAULT_HORIZON_YEAR
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_user_agent() -> String {
    "JyotiPath/1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for DashaSettings {
    fn default() -> Self {
        Self {
            horizon_year: default_horizon_year(),
        }
    }
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DashaSettings {
    pub fn options(&self) -> DashaOptions {
        DashaOptions {
            horizon_year: self.horizon_year,
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| anyhow::anyhow!("server.bind is not a socket address ({}): {e}", self.server.bind))
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.bind_addr()?;
        if !(1..=9999).contains(&self.dasha.horizon_year) {
            anyhow::bail!("dasha.horizon_year must be between 1 and 9999, got {}", self.dasha.horizon_year);
        }
        if self.geocoder.timeout_secs == 0 {
            anyhow::bail!("geocoder.timeout_secs must be positive");
        }
        if self.geocoder.user_agent.trim().is_empty() {
            anyhow::bail!("geocoder.user_agent must not be empty (Nominatim rejects anonymous clients)");
        }
        Ok(())
    }
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse jyotipath config: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file.
pub fn load_config_from(path: &Path) -> anyhow::Result<AppConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
    parse_config(&text)
}

/// Find the config file: `JYOTIPATH_CONFIG` first, then the search paths.
pub fn find_config_path() -> anyhow::Result<Option<PathBuf>> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(explicit);
        if !path.exists() {
            anyhow::bail!("{CONFIG_ENV} points to a missing file: {}", path.display());
        }
        return Ok(Some(path));
    }
    Ok(CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists()))
}

/// Load the service config, falling back to defaults when no file is found.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match find_config_path()? {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            load_config_from(&path)
        }
        None => {
            log::info!("No config file found in {:?}; using defaults", CONFIG_SEARCH_PATHS);
            let config = AppConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.dasha.horizon_year, 2055);
        assert_eq!(config.geocoder.timeout_secs, 15);
        assert_eq!(config.ephemeris.ayanamsa, "lahiri");
        assert_eq!(config.ephemeris.house_system, "placidus");
        assert!(config.ephemeris.path.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
            [server]
            bind = "127.0.0.1:9000"

            [dasha]
            horizon_year = 2100

            [geocoder]
            user_agent = "test-agent/0.1"

            [ephemeris]
            path = "/opt/ephe"
            ayanamsa = "raman"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
        assert_eq!(config.dasha.options().horizon_year, 2100);
        assert_eq!(config.geocoder.user_agent, "test-agent/0.1");
        assert_eq!(config.geocoder.base_url, "https://nominatim.openstreetmap.org/search");
        assert_eq!(config.ephemeris.path, Some(PathBuf::from("/opt/ephe")));
        assert_eq!(config.ephemeris.ayanamsa, "raman");
        assert_eq!(config.ephemeris.house_system, "placidus");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(parse_config("[server]\nbind = \"not an address\"").is_err());
        assert!(parse_config("[geocoder]\ntimeout_secs = 0").is_err());
        assert!(parse_config("[geocoder]\nuser_agent = \"  \"").is_err());
        assert!(parse_config("[dasha]\nhorizon_year = 0").is_err());
        assert!(parse_config("[dasha]\nhorizon_year = \"soon\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dasha]\nhorizon_year = 2070").unwrap();
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.dasha.horizon_year, 2070);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config_from(Path::new("/nonexistent/jyotipath.toml")).is_err());
    }
}
