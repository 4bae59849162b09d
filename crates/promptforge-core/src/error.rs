//! Error types for the PromptForge application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection of raw form input before any generation work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The idea is empty after trimming surrounding whitespace.
    #[error("Please describe what you want the AI to do.")]
    EmptyIdea,

    /// The idea exceeds the accepted length (counted in characters).
    #[error("Idea is too long: {length} characters (maximum {max})")]
    IdeaTooLong { length: usize, max: usize },
}

/// Failure of a single generation call.
///
/// The `Display` output of every variant is safe to show to an end user.
/// Underlying transport causes are logged by the client, never carried here.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationError {
    /// No API credential is configured; no network call was attempted.
    #[error("Gemini API key not found. Set GEMINI_API_KEY or add it to secret.json.")]
    MissingCredential,

    /// The provider could not be reached or rejected the call.
    #[error("{message}")]
    ProviderError { message: String },
}

impl GenerationError {
    /// Generic user-facing message for provider failures.
    pub const PROVIDER_MESSAGE: &'static str = "Failed to communicate with Gemini AI.";

    /// Creates a ProviderError with the generic user-safe message.
    pub fn provider() -> Self {
        Self::ProviderError {
            message: Self::PROVIDER_MESSAGE.to_string(),
        }
    }
}

/// Failure of the durable key-value storage.
///
/// Never surfaced by the history store; it is logged and absorbed there.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceError {
    /// File system or device error.
    #[error("Storage I/O error: {message}")]
    Io { message: String },

    /// The stored value could not be encoded or decoded.
    #[error("Storage serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Exclusive access to the store could not be obtained.
    #[error("Storage lock error: {0}")]
    Lock(String),

    /// The store refused the operation (e.g. invalid key, unavailable backend).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A shared error type for the whole PromptForge application.
#[derive(Error, Debug, Clone)]
pub enum ForgeError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ForgeError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ForgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ForgeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ForgeError>`.
pub type Result<T> = std::result::Result<T, ForgeError>;
