//! Configuration management for Jarvis services.
//!
//! All Jarvis services share a configuration file at `~/.product-jarvis/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (JARVIS_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `JARVIS_VALUATION_PORT` → services.valuation.port
//! - `JARVIS_BIND_ADDRESS` → network.bind
//! - `JARVIS_LOG_LEVEL` → observability.log_level
//! - `JARVIS_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default port of the valuation service.
pub const DEFAULT_VALUATION_PORT: u16 = 4450;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".product-jarvis"),
        |dirs| dirs.home_dir().join(".product-jarvis"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Network Configuration
// ============================================================================

/// Global network configuration.
///
/// Default bind is `127.0.0.1` (local only). Set to `0.0.0.0` to allow
/// remote access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_bind_address")]
    pub bind: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".into()
}

// ============================================================================
// Service Ports
// ============================================================================

/// Per-service port configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub valuation: ServicePortConfig,
}

/// Port override for a single service. `None` means the service default.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicePortConfig {
    #[serde(default)]
    pub port: Option<u16>,
}

// ============================================================================
// Observability
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets to set to `warn`.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Valuation Settings
// ============================================================================

/// How the one-time training cost flows into the annual internal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingCostPolicy {
    /// Spread over `amortization_years`.
    #[default]
    Amortized,
    /// Subtract the full amount (year-one view).
    FirstYear,
    /// Report the cost but leave the value untouched.
    Ignored,
}

/// Which figure represents external value when summed with internal drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExternalValueBasis {
    /// Net 3-year revenue divided by three.
    #[default]
    Annualized,
    /// Net 3-year revenue as-is.
    ThreeYearTotal,
}

/// Valuation engine policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSettings {
    #[serde(default)]
    pub training_cost_policy: TrainingCostPolicy,

    /// Years over which training cost is amortized.
    #[serde(default = "default_amortization_years")]
    pub amortization_years: u32,

    #[serde(default)]
    pub external_value_basis: ExternalValueBasis,

    /// Discount internal value by time-to-full-productivity.
    #[serde(default)]
    pub apply_productivity_ramp: bool,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            training_cost_policy: TrainingCostPolicy::default(),
            amortization_years: default_amortization_years(),
            external_value_basis: ExternalValueBasis::default(),
            apply_productivity_ramp: false,
        }
    }
}

fn default_amortization_years() -> u32 {
    3
}

/// Cost calculator defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalculatorSettings {
    /// Fee applied on top of labor + software overhead when a request omits one (%).
    #[serde(default)]
    pub default_fee_percent: f64,
}

// ============================================================================
// Root Config
// ============================================================================

/// Root configuration structure for all Jarvis services.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub valuation: ValuationSettings,

    #[serde(default)]
    pub calculator: CalculatorSettings,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("JARVIS_VALUATION_PORT") {
            if let Ok(p) = port.parse() {
                self.services.valuation.port = Some(p);
            }
        }

        if let Ok(bind) = std::env::var("JARVIS_BIND_ADDRESS") {
            self.network.bind = bind;
        }

        if let Ok(level) = std::env::var("JARVIS_LOG_LEVEL") {
            self.observability.log_level = level;
        }

        if let Ok(format) = std::env::var("JARVIS_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    // =========================================================================
    // Endpoint convenience methods
    // =========================================================================

    /// Get the effective bind address.
    pub fn bind_address(&self) -> &str {
        &self.network.bind
    }

    /// Get the valuation service port.
    pub fn valuation_port(&self) -> u16 {
        self.services
            .valuation
            .port
            .unwrap_or(DEFAULT_VALUATION_PORT)
    }

    /// Get the valuation service endpoint URL.
    pub fn valuation_endpoint(&self) -> String {
        format!("http://{}:{}", self.bind_address(), self.valuation_port())
    }
}
