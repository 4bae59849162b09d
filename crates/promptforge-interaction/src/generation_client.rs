//! PromptGenerator backed by a remote text-generation service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use promptforge_core::config::GenerationSettings;
use promptforge_core::error::GenerationError;
use promptforge_core::generation::{EMPTY_RESPONSE_FALLBACK, PromptGenerator, SamplingConfig};
use promptforge_core::request::PromptRequest;
use promptforge_core::secret::SecretService;

use crate::gemini_api_agent::{GeminiApiAgent, GeminiApiError, GenerationBackend, GenerationCall};
use crate::presets::default_system_instruction;

/// Turns a [`PromptRequest`] into an optimized prompt with one remote call.
///
/// The credential is requested from the [`SecretService`] on every
/// invocation. When no key is configured the backend is never contacted.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    secrets: Arc<dyn SecretService>,
    model: String,
    system_instruction: String,
    sampling: SamplingConfig,
}

impl GenerationClient {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        secrets: Arc<dyn SecretService>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            secrets,
            model: model.into(),
            system_instruction: default_system_instruction().to_string(),
            sampling: SamplingConfig::DEFAULT,
        }
    }

    /// Builds a client talking to Gemini with the endpoint, model and timeout
    /// from `settings`.
    pub fn from_settings(
        settings: &GenerationSettings,
        secrets: Arc<dyn SecretService>,
    ) -> Result<Self, GeminiApiError> {
        let agent = GeminiApiAgent::with_base_url(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(agent), secrets, settings.model.clone()))
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn sampling(&self) -> SamplingConfig {
        self.sampling
    }

    /// Resolves the key and model to use, or reports the credential missing.
    async fn resolve_credential(&self) -> Result<(String, String), GenerationError> {
        let secrets = match self.secrets.load_secrets().await {
            Ok(secrets) => secrets,
            Err(e) => {
                tracing::warn!("Could not load credentials: {}", e);
                return Err(GenerationError::MissingCredential);
            }
        };

        let Some(api_key) = secrets.gemini_api_key().map(str::to_string) else {
            tracing::warn!("Generation skipped: no API key configured");
            return Err(GenerationError::MissingCredential);
        };
        // A model pinned next to the key wins over config.toml
        let model = secrets.gemini_model().unwrap_or(&self.model).to_string();

        Ok((api_key, model))
    }
}

#[async_trait]
impl PromptGenerator for GenerationClient {
    async fn generate(&self, request: &PromptRequest) -> Result<String, GenerationError> {
        let (api_key, model) = self.resolve_credential().await?;

        let user_message = request.to_user_message();
        let call = GenerationCall {
            api_key: &api_key,
            model: &model,
            system_instruction: &self.system_instruction,
            user_message: &user_message,
            sampling: self.sampling,
        };

        tracing::info!(
            %model,
            prompt_type = request.prompt_type().as_str(),
            "Requesting optimized prompt"
        );

        match self.backend.generate_content(call).await {
            Ok(Some(text)) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                tracing::warn!("Provider returned no text, using fallback");
                Ok(EMPTY_RESPONSE_FALLBACK.to_string())
            }
            Err(e) => {
                tracing::error!(retryable = e.is_retryable(), "Gemini API error: {}", e);
                Err(GenerationError::provider())
            }
        }
    }
}
