//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ibge: IbgeConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// IBGE API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IbgeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://servicodados.ibge.gov.br/api".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("ibge-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for IbgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// A city shown in the no-selection ranking chart
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeaturedCity {
    pub id: u32,
    pub name: String,
}

impl FeaturedCity {
    fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Dashboard selection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Supported state (UF abbreviation)
    #[serde(default = "default_state")]
    pub state: String,

    /// IBGE code of the supported state
    #[serde(default = "default_state_code")]
    pub state_code: u32,

    #[serde(default = "default_state_name")]
    pub state_name: String,

    /// Maximum bars in a multi-location chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_featured_cities")]
    pub featured_cities: Vec<FeaturedCity>,
}

fn default_state() -> String {
    "MA".to_string()
}

fn default_state_code() -> u32 {
    21
}

fn default_state_name() -> String {
    "Maranhão".to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_featured_cities() -> Vec<FeaturedCity> {
    vec![
        FeaturedCity::new(2111300, "São Luís"),
        FeaturedCity::new(2105302, "Imperatriz"),
        FeaturedCity::new(2111201, "São José de Ribamar"),
        FeaturedCity::new(2112209, "Timon"),
        FeaturedCity::new(2103000, "Caxias"),
        FeaturedCity::new(2103307, "Codó"),
        FeaturedCity::new(2107506, "Paço do Lumiar"),
        FeaturedCity::new(2100055, "Açailândia"),
        FeaturedCity::new(2101202, "Bacabal"),
        FeaturedCity::new(2101400, "Balsas"),
    ]
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            state: default_state(),
            state_code: default_state_code(),
            state_name: default_state_name(),
            top_n: default_top_n(),
            featured_cities: default_featured_cities(),
        }
    }
}

/// Simulated data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Relative jitter applied to base values (0.15 = ±15%)
    #[serde(default = "default_jitter")]
    pub jitter: f64,

    /// Fixed RNG seed; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_jitter() -> f64 {
    0.15
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            jitter: default_jitter(),
            seed: None,
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// How long provenance notices stay visible
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: i64,

    /// Bar width budget for terminal rendering (characters)
    #[serde(default = "default_terminal_width")]
    pub terminal_width: usize,
}

fn default_notice_ttl() -> i64 {
    8
}

fn default_terminal_width() -> usize {
    40
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: default_notice_ttl(),
            terminal_width: default_terminal_width(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
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
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ibge-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    ///
    /// The state abbreviation, IBGE code and name describe one state and
    /// are overridden together through `IBGE_DASHBOARD_STATE`,
    /// `IBGE_DASHBOARD_STATE_CODE` and `IBGE_DASHBOARD_STATE_NAME`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("IBGE_DASHBOARD_API_URL") {
            self.ibge.base_url = url;
        }
        if let Some(timeout) = var("IBGE_DASHBOARD_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.ibge.request_timeout_secs = t;
            }
        }

        if let Some(state) = var("IBGE_DASHBOARD_STATE") {
            self.dashboard.state = state.to_uppercase();
        }
        if let Some(code) = var("IBGE_DASHBOARD_STATE_CODE") {
            if let Ok(c) = code.parse() {
                self.dashboard.state_code = c;
            }
        }
        if let Some(name) = var("IBGE_DASHBOARD_STATE_NAME") {
            self.dashboard.state_name = name;
        }

        if let Some(seed) = var("IBGE_DASHBOARD_SEED") {
            if let Ok(s) = seed.parse() {
                self.simulation.seed = Some(s);
            }
        }

        if let Some(level) = var("IBGE_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("IBGE_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# IBGE Dashboard Configuration
#
# Environment variables override these settings:
# - IBGE_DASHBOARD_API_URL
# - IBGE_DASHBOARD_TIMEOUT_SECS
# - IBGE_DASHBOARD_STATE, IBGE_DASHBOARD_STATE_CODE, IBGE_DASHBOARD_STATE_NAME
#   (set together; they describe one state)
# - IBGE_DASHBOARD_SEED
# - IBGE_DASHBOARD_LOG_LEVEL
# - IBGE_DASHBOARD_LOG_FORMAT

[ibge]
# IBGE service data API base URL
base_url = "https://servicodados.ibge.gov.br/api"

# Request timeout in seconds
request_timeout_secs = 15

[dashboard]
# Supported state (only this state loads its city list).
# state, state_code and state_name must describe the same state.
state = "MA"
state_code = 21
state_name = "Maranhão"

# Maximum bars in a multi-city chart
top_n = 10

# Cities compared when no city is selected
featured_cities = [
    { id = 2111300, name = "São Luís" },
    { id = 2105302, name = "Imperatriz" },
    { id = 2111201, name = "São José de Ribamar" },
    { id = 2112209, name = "Timon" },
    { id = 2103000, name = "Caxias" },
    { id = 2103307, name = "Codó" },
    { id = 2107506, name = "Paço do Lumiar" },
    { id = 2100055, name = "Açailândia" },
    { id = 2101202, name = "Bacabal" },
    { id = 2101400, name = "Balsas" },
]

[simulation]
# Relative jitter for simulated values (0.15 = ±15%)
jitter = 0.15

# Fixed seed for reproducible simulated values
# seed = 42

[chart]
# Seconds a provenance notice stays visible
notice_ttl_secs = 8

# Width of the longest bar in terminal output
terminal_width = 40

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
