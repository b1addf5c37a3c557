use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cli::Args;

pub const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
const APP_DIR: &str = "harmonic-stats";
/// Largest accepted log rotation size (1 TiB).
const MAX_ROTATION_SIZE_MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Result counts requested by each page.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    pub search: u32,
    pub top_tracks: u32,
    pub similar: u32,
    pub charts: u32,
    pub top_charts_page_size: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            search: 10,
            top_tracks: 10,
            similar: 5,
            charts: 10,
            top_charts_page_size: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// error, warn, info, debug or trace
    pub level: String,
    /// Overrides the platform data directory.
    pub directory: Option<PathBuf>,
    pub rotate: bool,
    pub rotation_size_mb: u64,
    pub keep_log_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            rotate: true,
            rotation_size_mb: 10,
            keep_log_files: 5,
        }
    }
}

impl LoggingSettings {
    pub fn rotation_bytes(&self) -> u64 {
        self.rotation_size_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiSettings,
    limits: Limits,
    logging: LoggingSettings,
}

/// Settings shared by the HTTP client, the pages and the logger.
#[derive(Clone, Debug)]
pub struct AppConfig {
    api: ApiSettings,
    limits: Limits,
    logging: LoggingSettings,
    log_dir: PathBuf,
    user_agent: String,
    client_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_parts(ConfigFile::default())
    }
}

impl AppConfig {
    fn from_parts(file: ConfigFile) -> Self {
        let client_id = format!("harmonic-stats-{}", Uuid::new_v4());
        let user_agent = format!(
            "harmonic-stats/{} ( unique-id={client_id} )",
            env!("CARGO_PKG_VERSION")
        );
        let log_dir = file
            .logging
            .directory
            .clone()
            .unwrap_or_else(default_log_dir);

        Self {
            api: file.api,
            limits: file.limits,
            logging: file.logging,
            log_dir,
            user_agent,
            client_id,
        }
    }

    /// Reads the TOML file (an absent file means defaults) and applies CLI overrides.
    pub fn load(args: &Args) -> Result<Self> {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };

        let file = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str::<ConfigFile>(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else if args.config.is_some() {
            bail!("Config file not found: {}", path.display());
        } else {
            ConfigFile::default()
        };

        let mut config = Self::from_parts(file);
        if let Some(key) = &args.api_key {
            config.api.api_key = key.clone();
        }
        if let Some(url) = &args.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(level) = &args.log_level {
            config.logging.level = level.clone();
        }
        Ok(config)
    }

    /// Rejects settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            bail!(
                "No API key configured: set `api.api_key` in the config file or the LASTFM_API_KEY environment variable"
            );
        }
        reqwest::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;
        if self.logging.rotate
            && !(1..=MAX_ROTATION_SIZE_MB).contains(&self.logging.rotation_size_mb)
        {
            bail!(
                "`logging.rotation_size_mb` must be between 1 and {MAX_ROTATION_SIZE_MB}, got {}",
                self.logging.rotation_size_mb
            );
        }
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api.api_key
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_secs)
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn logging(&self) -> &LoggingSettings {
        &self.logging
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Ensures the log directory exists.
    pub fn ensure_filesystem(&self) -> Result<()> {
        fs::create_dir_all(self.log_dir())
            .with_context(|| format!("Failed to create directory: {}", self.log_dir().display()))
    }

    #[cfg(test)]
    pub fn for_tests(base_url: &str, api_key: &str) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.to_string();
        config.api.api_key = api_key.to_string();
        config
    }
}

fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_DIR).join("config.toml"))
}

fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args_with(config: Option<PathBuf>) -> Args {
        Args {
            config,
            api_key: None,
            base_url: None,
            route: "/".to_string(),
            log_level: None,
        }
    }

    #[test]
    fn defaults_match_page_sizes() {
        let limits = Limits::default();
        assert_eq!(limits.search, 10);
        assert_eq!(limits.similar, 5);
        assert_eq!(limits.top_charts_page_size, 20);
        assert_eq!(AppConfig::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn loads_partial_file_and_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\napi_key = \"abc123\"\n\n[limits]\nsearch = 25\n"
        )
        .unwrap();

        let config = AppConfig::load(&args_with(Some(file.path().to_path_buf()))).unwrap();
        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.limits().search, 25);
        assert_eq!(config.limits().charts, 10);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\napi_key = \"from-file\"\n").unwrap();

        let mut args = args_with(Some(file.path().to_path_buf()));
        args.api_key = Some("from-cli".to_string());
        args.base_url = Some("http://localhost:9000/2.0/".to_string());

        let config = AppConfig::load(&args).unwrap();
        assert_eq!(config.api_key(), "from-cli");
        assert_eq!(config.base_url(), "http://localhost:9000/2.0/");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(&args_with(Some(missing))).is_err());
    }

    #[test]
    fn validate_requires_api_key() {
        assert!(AppConfig::default().validate().is_err());
        assert!(AppConfig::for_tests(DEFAULT_BASE_URL, "key").validate().is_ok());
        assert!(AppConfig::for_tests("not a url", "key").validate().is_err());
    }

    #[test]
    fn oversized_rotation_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\napi_key = \"abc\"\n\n[logging]\nrotation_size_mb = 9223372036854775807\n"
        )
        .unwrap();

        let config = AppConfig::load(&args_with(Some(file.path().to_path_buf()))).unwrap();
        assert!(config.validate().is_err());
        assert_eq!(config.logging().rotation_bytes(), u64::MAX);
        assert_eq!(LoggingSettings::default().rotation_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn user_agent_carries_client_id() {
        let config = AppConfig::default();
        assert!(config.user_agent().contains(config.client_id()));
    }
}
