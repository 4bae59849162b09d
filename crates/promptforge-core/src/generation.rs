//! Generation contract shared by the controller and the LLM adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::request::PromptRequest;

/// Text returned when the provider answers without any text payload.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Failed to generate optimized prompt.";

/// Fixed sampling parameters sent with every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
}

impl SamplingConfig {
    pub const DEFAULT: SamplingConfig = SamplingConfig {
        temperature: 0.7,
        top_p: 0.95,
    };
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Something that turns a validated request into an optimized prompt.
///
/// One invocation performs at most one outbound call and never retries.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    async fn generate(&self, request: &PromptRequest) -> Result<String, GenerationError>;
}

/// Transient state of the current generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum GenerationOutcome {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl GenerationOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the attempt has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    /// The generated text, when the attempt succeeded.
    pub fn result(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl From<Result<String, GenerationError>> for GenerationOutcome {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let ok: GenerationOutcome = Ok::<_, GenerationError>("text".to_string()).into();
        assert_eq!(ok.result(), Some("text"));
        assert!(ok.is_settled());

        let err: GenerationOutcome = Err::<String, _>(GenerationError::MissingCredential).into();
        assert!(err.error().unwrap().contains("API key"));
        assert!(err.result().is_none());
    }

    #[test]
    fn test_default_outcome_is_idle() {
        let outcome = GenerationOutcome::default();
        assert_eq!(outcome, GenerationOutcome::Idle);
        assert!(!outcome.is_settled());
        assert!(!outcome.is_loading());
    }

    #[test]
    fn test_sampling_defaults() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.temperature, 0.7);
        assert_eq!(sampling.top_p, 0.95);
    }
}
