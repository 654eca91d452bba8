use crate::utils::error::{BotError, Result};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_range, validate_socket_addr,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CHANNEL_ACCESS_TOKEN_ENV: &str = "CHANNEL_ACCESS_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub quote: QuoteConfig,
    pub line: LineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

/// How profit is derived from the market price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfitPolicy {
    /// `profit = market_price - total_cost`
    #[default]
    GrossQuote,
    /// `profit = market_price * resale_net_factor - total_cost`
    NetOfResaleFee { resale_net_factor: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Surcharge applied to the declared cost (marketplace and payment fees).
    pub fee_multiplier: f64,
    pub profit_policy: ProfitPolicy,
    /// Absolute profit floor, in currency units.
    pub profit_threshold: f64,
    /// Profit-rate floor as a ratio (0.35 == 35%).
    pub profit_rate_threshold: f64,
    pub currency: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee_multiplier: 1.15,
            profit_policy: ProfitPolicy::GrossQuote,
            profit_threshold: 10_000.0,
            profit_rate_threshold: 0.35,
            currency: "JPY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSourceKind {
    /// Ask the scrape endpoint over HTTP.
    #[default]
    Http,
    /// Answer with `stub_price` without any network call.
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub source: QuoteSourceKind,
    pub endpoint: String,
    /// Constant served by the scrape placeholder.
    pub stub_price: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            source: QuoteSourceKind::Http,
            endpoint: "http://127.0.0.1:3000/api/scrape".to_string(),
            stub_price: 63_000.0,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub reply_endpoint: String,
    pub channel_access_token: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            reply_endpoint: "https://api.line.me/v2/bot/message/reply".to_string(),
            channel_access_token: String::new(),
        }
    }
}

// Keeps the access token out of debug logs.
impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("reply_endpoint", &self.reply_endpoint)
            .field(
                "channel_access_token",
                &if self.channel_access_token.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .finish()
    }
}

impl BotConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string, substituting `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads the file when given, otherwise defaults, then fills in the token from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if self.line.channel_access_token.trim().is_empty()
            || self.line.channel_access_token.starts_with("${")
        {
            if let Ok(token) = std::env::var(CHANNEL_ACCESS_TOKEN_ENV) {
                self.line.channel_access_token = token;
            }
        }
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BotError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.bind)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        validate_finite("engine.fee_multiplier", self.fee_multiplier)?;
        validate_range("engine.fee_multiplier", self.fee_multiplier, 1.0, 10.0)?;

        validate_finite("engine.profit_threshold", self.profit_threshold)?;
        if self.profit_threshold < 0.0 {
            return Err(BotError::InvalidConfigValueError {
                field: "engine.profit_threshold".to_string(),
                value: self.profit_threshold.to_string(),
                reason: "Value cannot be negative".to_string(),
            });
        }

        validate_finite("engine.profit_rate_threshold", self.profit_rate_threshold)?;
        validate_range(
            "engine.profit_rate_threshold",
            self.profit_rate_threshold,
            0.0,
            10.0,
        )?;

        if let ProfitPolicy::NetOfResaleFee { resale_net_factor } = self.profit_policy {
            validate_finite("engine.profit_policy.resale_net_factor", resale_net_factor)?;
            if resale_net_factor <= 0.0 || resale_net_factor > 1.0 {
                return Err(BotError::InvalidConfigValueError {
                    field: "engine.profit_policy.resale_net_factor".to_string(),
                    value: resale_net_factor.to_string(),
                    reason: "Value must be greater than 0 and at most 1".to_string(),
                });
            }
        }

        validate_non_empty_string("engine.currency", &self.currency)
    }
}

impl Validate for QuoteConfig {
    fn validate(&self) -> Result<()> {
        if self.source == QuoteSourceKind::Http {
            validate_url("quote.endpoint", &self.endpoint)?;
        }
        validate_finite("quote.stub_price", self.stub_price)?;
        if self.stub_price <= 0.0 {
            return Err(BotError::InvalidConfigValueError {
                field: "quote.stub_price".to_string(),
                value: self.stub_price.to_string(),
                reason: "Value must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for LineConfig {
    fn validate(&self) -> Result<()> {
        validate_url("line.reply_endpoint", &self.reply_endpoint)?;
        if self.channel_access_token.trim().is_empty()
            || self.channel_access_token.starts_with("${")
        {
            return Err(BotError::MissingConfigError {
                field: format!(
                    "line.channel_access_token (or {} environment variable)",
                    CHANNEL_ACCESS_TOKEN_ENV
                ),
            });
        }
        Ok(())
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.engine.validate()?;
        self.quote.validate()?;
        self.line.validate()?;
        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
