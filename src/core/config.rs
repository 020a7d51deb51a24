use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "TIMETABLE_API_URL";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_admin_login_path")]
    pub admin_login_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// `file` keeps the session across invocations, `memory` drops it on exit
    #[serde(default = "default_session_storage")]
    pub storage: String,
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_admin_login_path() -> String {
    "/admin/login".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_session_storage() -> String {
    "file".to_string()
}

fn default_session_path() -> PathBuf {
    PathBuf::from("timetable-session.json")
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            admin_login_path: default_admin_login_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: default_session_storage(),
            path: default_session_path(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            num_threads: default_num_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides(std::env::var(API_URL_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load from the file when it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        let mut config = Config::default();
        config.apply_env_overrides(std::env::var(API_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// The base URL environment variable wins over the file
    pub fn apply_env_overrides(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            bail!("base_url must not be empty");
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            bail!(
                "Invalid base_url '{}'. Must start with http:// or https://",
                self.api.base_url
            );
        }

        for (name, path) in [
            ("login_path", &self.api.login_path),
            ("admin_login_path", &self.api.admin_login_path),
        ] {
            if !path.starts_with('/') {
                bail!("{} must start with '/', got '{}'", name, path);
            }
        }

        if self.api.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }

        let valid_storage = ["file", "memory"];
        if !valid_storage.contains(&self.session.storage.as_str()) {
            bail!(
                "Invalid session storage '{}'. Must be one of: file, memory",
                self.session.storage
            );
        }

        if self.session.storage == "file" && self.session.path.as_os_str().is_empty() {
            bail!("session path must not be empty when storage is 'file'");
        }

        if self.runtime.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.login_path, "/login");
        assert_eq!(config.api.admin_login_path, "/admin/login");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.storage, "file");
        assert_eq!(config.session.path, PathBuf::from("timetable-session.json"));
        assert!(config.runtime.num_threads > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_parses() {
        let config = Config::from_toml_str(
            r#"
            [api]
            base_url = "https://timetable.example.edu"
            login_path = "/api/login"
            timeout_secs = 5

            [session]
            storage = "memory"
            path = "/tmp/session.json"

            [runtime]
            num_threads = 2

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://timetable.example.edu");
        assert_eq!(config.api.login_path, "/api/login");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.session.storage, "memory");
        assert_eq!(config.session.path, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.runtime.num_threads, 2);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = Config::default();
        config.apply_env_overrides(Some(" http://backend:8080 ".to_string()));
        assert_eq!(config.api.base_url, "http://backend:8080");

        config.apply_env_overrides(Some("   ".to_string()));
        assert_eq!(config.api.base_url, "http://backend:8080");

        config.apply_env_overrides(None);
        assert_eq!(config.api.base_url, "http://backend:8080");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.login_path = "login".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.storage = "redis".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::from_file(Path::new("/nonexistent/timetable-client.toml")).is_err());
    }
}
