use thiserror::Error;

/// Reply sent when the inbound text is not `"<product-id> <cost>"`.
pub const MALFORMED_INPUT_REPLY: &str =
    "❌ Invalid message format. Send \"<product-id> <cost>\", e.g. \"ABC-123 40000\"";

/// Reply sent when no market price could be obtained.
pub const QUOTE_UNAVAILABLE_REPLY: &str = "❌ Failed to fetch the market price";

/// Reply used for any other failure inside the pipeline.
pub const INTERNAL_FAILURE_REPLY: &str = "❌ Something went wrong, please try again later";

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Market quote unavailable for product '{product_id}'")]
    QuoteUnavailable { product_id: String },

    #[error("Reply delivery failed: {message}")]
    DeliveryFailure { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },
}

impl BotError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Errors the pipeline turns into a fallback reply instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::QuoteUnavailable { .. } | Self::DeliveryFailure { .. }
        )
    }

    /// Fixed user-facing text for this error.
    pub fn fallback_reply(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => MALFORMED_INPUT_REPLY,
            Self::QuoteUnavailable { .. } => QUOTE_UNAVAILABLE_REPLY,
            _ => INTERNAL_FAILURE_REPLY,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
