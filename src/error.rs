//! Error types for atlassian-mcp
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while serving tool calls
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Missing or unusable configuration (fatal at startup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP failure or network fault talking to a backing service
    #[error("{}", transport_message(.status, .message))]
    Transport { status: Option<u16>, message: String },

    /// HTTP verb outside GET/POST/PUT
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Missing or invalid tool argument
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// A tool with this name is already registered
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// REST payload lacked a mandatory field
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Request failed with status {}: {}", code, message),
        None => format!("Request failed: {}", message),
    }
}

impl BridgeError {
    /// Build a transport error from an HTTP status and response body
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for atlassian-mcp operations
pub type Result<T> = std::result::Result<T, BridgeError>;
