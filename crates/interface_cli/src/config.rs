//! Console configuration

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

use core_kernel::CoreError;
use domain_claims::HttpGatewayConfig;

/// Prefix of every environment variable read by [`CliConfig::from_env`]
pub const ENV_PREFIX: &str = "CLAIM_WIZARD";

/// Output format of the log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the claims back office API
    pub gateway_url: String,
    /// Bearer token for the API
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Log level or filter directive
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Operator name attached to every remote call
    pub operator: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let gateway = HttpGatewayConfig::default();
        Self {
            gateway_url: gateway.base_url,
            api_token: None,
            timeout_secs: gateway.timeout_secs,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            operator: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `CLAIM_WIZARD_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    /// Loads configuration from a prepared builder, filling gaps with defaults
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// Checks the values that cannot be defaulted sensibly
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` for a blank gateway URL or a zero
    /// timeout
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.gateway_url.trim().is_empty() {
            return Err(CoreError::configuration("gateway_url must not be blank"));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::configuration("timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Settings for the HTTP gateway
    pub fn gateway_config(&self) -> HttpGatewayConfig {
        HttpGatewayConfig {
            base_url: self.gateway_url.clone(),
            api_token: self
                .api_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            timeout_secs: self.timeout_secs,
        }
    }
}
