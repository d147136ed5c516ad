//! Trip planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main trip planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Narrative generator (LLM) configuration
    pub llm: LlmConfig,

    /// Maps/places provider configuration
    pub maps: MapsConfig,

    /// Application-level settings
    pub app: AppConfig,

    /// Enrichment cache
    pub cache: CacheConfig,

    /// Per-caller rate limiting
    #[serde(rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,

    /// Orchestration settings
    pub planner: PlannerConfig,

    /// Prompt template overrides
    pub prompts: PromptsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Both provider API keys must be present; the server refuses to start
    /// a collaborator without its key.
    pub fn validate(&self) -> Result<()> {
        self.llm.get_api_key()?;
        self.maps.get_api_key()?;
        if self.rate_limit.enabled && self.rate_limit.requests == 0 {
            return Err(eyre::eyre!("rate-limit.requests must be at least 1 when rate limiting is enabled"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplanner.yml
        let local_config = PathBuf::from(".tripplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplanner/tripplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripplanner").join("tripplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// `DEBUG` and `ENVIRONMENT` win over the file values
    fn apply_env_overrides(&mut self) {
        if let Ok(debug) = std::env::var("DEBUG") {
            self.app.debug = debug.eq_ignore_ascii_case("true");
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            if !environment.trim().is_empty() {
                self.app.environment = environment.trim().to_string();
            }
        }
    }
}

fn read_key_env(var: &str, what: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(eyre::eyre!("{} API key not found. Set the {} environment variable.", what, var)),
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Send permissive CORS headers
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            cors: true,
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "anthropic")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        read_key_env(&self.api_key_env, "LLM")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-pro-exp-02-05".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_tokens: 8192,
            timeout_ms: 120_000,
        }
    }
}

/// Maps/places provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Nearby search radius in meters
    #[serde(rename = "radius-m")]
    pub radius_m: u32,

    /// Nearby lodging results to expand into hotel listings
    #[serde(rename = "max-hotels")]
    pub max_hotels: usize,

    /// Nearby attractions to take a photo from
    #[serde(rename = "max-landmarks")]
    pub max_landmarks: usize,

    /// `maxwidth` parameter of generated photo URLs
    #[serde(rename = "photo-max-width")]
    pub photo_max_width: u32,
}

impl MapsConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        read_key_env(&self.api_key_env, "Maps")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_MAPS_API_KEY".to_string(),
            base_url: "https://maps.googleapis.com".to_string(),
            timeout_ms: 10_000,
            radius_m: 5000,
            max_hotels: 8,
            max_landmarks: 15,
            photo_max_width: 800,
        }
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Debug mode (forces DEBUG logging unless a level is given)
    pub debug: bool,

    /// Deployment environment name
    pub environment: String,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            environment: "development".to_string(),
            log_level: None,
        }
    }
}

/// Enrichment cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Entry lifetime in seconds
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 3600,
        }
    }
}

/// Per-caller rate limit settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Requests allowed per period
    pub requests: u32,

    /// Period length in seconds
    #[serde(rename = "period-secs")]
    pub period_secs: u64,
}

impl RateLimitConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests: 100,
            period_secs: 3600,
        }
    }
}

/// Orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Upper bound for each enrichment lookup in milliseconds
    #[serde(rename = "lookup-timeout-ms")]
    pub lookup_timeout_ms: u64,

    /// Photo entry returned when no landmark photos are found
    #[serde(rename = "placeholder-photo")]
    pub placeholder_photo: String,
}

impl PlannerConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 30_000,
            placeholder_photo: "default_photo_url".to_string(),
        }
    }
}

/// Prompt template overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory searched for `{name}.pmt` before the embedded templates
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert_eq!(config.maps.radius_m, 5000);
        assert_eq!(config.rate_limit.requests, 100);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.planner.placeholder_photo, "default_photo_url");
    }

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmConfig::default();

        assert_eq!(config.provider, "gemini");
        assert!(config.model.contains("gemini"));
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
server:
  bind: 127.0.0.1:9000
  cors: false

llm:
  provider: anthropic
  model: claude-sonnet-4
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 4096
  timeout-ms: 60000

maps:
  radius-m: 2500
  max-hotels: 4

rate-limit:
  requests: 10
  period-secs: 60
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert!(!config.server.cors);
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.maps.radius_m, 2500);
        assert_eq!(config.maps.max_hotels, 4);
        assert_eq!(config.maps.max_landmarks, 15);
        assert_eq!(config.rate_limit.requests, 10);
        assert_eq!(config.rate_limit.period(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-1.5-flash
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.maps.api_key_env, "GOOGLE_MAPS_API_KEY");
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "planner:\n  placeholder-photo: none.jpg\n  lookup-timeout-ms: 500").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.planner.placeholder_photo, "none.jpg");
        assert_eq!(config.planner.lookup_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_from_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/tripplanner.yml");
        assert!(Config::load_file_chain(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_validate_requires_api_keys() {
        let mut config = Config::default();
        config.llm.api_key_env = "TP_TEST_LLM_KEY".to_string();
        config.maps.api_key_env = "TP_TEST_MAPS_KEY".to_string();

        unsafe {
            std::env::remove_var("TP_TEST_LLM_KEY");
            std::env::remove_var("TP_TEST_MAPS_KEY");
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TP_TEST_LLM_KEY"));

        unsafe {
            std::env::set_var("TP_TEST_LLM_KEY", "llm-key");
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TP_TEST_MAPS_KEY"));

        unsafe {
            std::env::set_var("TP_TEST_MAPS_KEY", "maps-key");
        }
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.get_api_key().unwrap(), "llm-key");

        unsafe {
            std::env::remove_var("TP_TEST_LLM_KEY");
            std::env::remove_var("TP_TEST_MAPS_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        unsafe {
            std::env::set_var("DEBUG", "True");
            std::env::set_var("ENVIRONMENT", "production");
        }
        let mut config = Config::default();
        config.apply_env_overrides();
        assert!(config.app.debug);
        assert_eq!(config.app.environment, "production");

        unsafe {
            std::env::set_var("DEBUG", "no");
            std::env::remove_var("ENVIRONMENT");
        }
        let mut config = Config::default();
        config.apply_env_overrides();
        assert!(!config.app.debug);
        assert_eq!(config.app.environment, "development");

        unsafe {
            std::env::remove_var("DEBUG");
        }
    }
}
