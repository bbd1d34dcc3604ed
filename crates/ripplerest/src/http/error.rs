/*
[INPUT]:  Error sources (HTTP, gateway envelopes, serialization, entity construction)
[OUTPUT]: Structured error types carrying the server's message verbatim
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// A required entity field was missing or malformed.
///
/// Points at a protocol mismatch or bad caller input, never at the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot construct {entity}: {reason}")]
pub struct ConstructionError {
    pub entity: &'static str,
    pub reason: String,
}

impl ConstructionError {
    pub fn new(entity: &'static str, reason: impl Into<String>) -> Self {
        Self {
            entity,
            reason: reason.into(),
        }
    }

    pub fn missing_field(entity: &'static str, field: &str) -> Self {
        Self::new(entity, format!("missing field `{field}`"))
    }
}

/// Main error type for the ripple-rest client
#[derive(Error, Debug)]
pub enum RippleRestError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway reported a failure
    #[error("{message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// A response or caller payload lacked a required entity field
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response was not a gateway envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RippleRestError {
    /// Create a remote error from a message reported by the gateway
    pub fn remote(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        RippleRestError::Remote {
            status: status.map(|s| s.as_u16()),
            message: message.into(),
        }
    }

    /// Server message of a remote error
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            RippleRestError::Remote { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, RippleRestError::Remote { .. })
    }

    /// The payment was rejected because its `client_resource_id` was used
    /// before. Reset the resource id before submitting again.
    pub fn is_duplicate_resource_id(&self) -> bool {
        self.remote_message().is_some_and(|message| {
            let message = message.to_ascii_lowercase();
            message.contains("client_resource_id")
                && (message.contains("already exists") || message.contains("duplicate"))
        })
    }
}

/// Result type alias for ripple-rest operations
pub type Result<T> = std::result::Result<T, RippleRestError>;
