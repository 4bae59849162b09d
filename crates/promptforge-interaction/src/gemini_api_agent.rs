//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls the `generateContent` endpoint with a system instruction, a single
//! user turn and fixed sampling parameters.

use async_trait::async_trait;
use promptforge_core::config::DEFAULT_GEMINI_BASE_URL;
use promptforge_core::generation::SamplingConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport-level failure talking to Gemini.
///
/// These carry provider detail for logs; they are never shown to end users.
/// Calls are never retried, `is_retryable` only annotates the log line.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    #[error("Gemini API request failed: {message}")]
    Transport { message: String, is_retryable: bool },

    #[error("Gemini API error {status_code}: {message}")]
    Http {
        status_code: u16,
        message: String,
        is_retryable: bool,
    },

    #[error("Failed to parse Gemini response: {0}")]
    InvalidResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl GeminiApiError {
    /// Whether the provider signalled that a later attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { is_retryable, .. } | Self::Http { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }
}

/// One generation call as seen by the transport.
#[derive(Clone, Copy)]
pub struct GenerationCall<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub system_instruction: &'a str,
    pub user_message: &'a str,
    pub sampling: SamplingConfig,
}

/// The remote text-generation capability.
///
/// `Ok(None)` means the provider answered but produced no text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_content(
        &self,
        call: GenerationCall<'_>,
    ) -> Result<Option<String>, GeminiApiError>;
}

/// Backend implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates an agent against the public endpoint with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, GeminiApiError> {
        Self::with_base_url(DEFAULT_GEMINI_BASE_URL, timeout)
    }

    /// Creates an agent against a custom endpoint (proxies, tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeminiApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiApiError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{model}:generateContent", self.base_url)
    }

    async fn send_request(
        &self,
        api_key: &str,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<Option<String>, GeminiApiError> {
        let url = self.endpoint(model);
        tracing::debug!(%url, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                GeminiApiError::Transport {
                    message: err.without_url().to_string(),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GeminiApiError::InvalidResponse(err.to_string()))?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl GenerationBackend for GeminiApiAgent {
    async fn generate_content(
        &self,
        call: GenerationCall<'_>,
    ) -> Result<Option<String>, GeminiApiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: call.user_message.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: call.system_instruction.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: call.sampling.temperature,
                top_p: call.sampling.top_p,
            },
        };
        self.send_request(call.api_key, call.model, &request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text parts of the first candidate. Empty text counts as absent.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() { None } else { Some(text) }
}

fn map_http_error(status: StatusCode, body: String) -> GeminiApiError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GeminiApiError::Http {
        status_code: status.as_u16(),
        message,
        is_retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: "be brief".to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: 0.5,
                top_p: 0.25,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert_eq!(json["generationConfig"]["topP"], 0.25);
    }

    #[test]
    fn test_extract_joins_text_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Role: a"}, {"text": "\nGoal: b"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_text_response(response),
            Some("Role: a\nGoal: b".to_string())
        );
    }

    #[test]
    fn test_extract_missing_text_is_none() {
        for body in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
            assert_eq!(extract_text_response(response), None, "body {body}");
        }
    }

    #[test]
    fn test_map_http_error_uses_provider_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        match &err {
            GeminiApiError::Http {
                status_code,
                message,
                ..
            } => {
                assert_eq!(*status_code, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("Expected Http error, got {other:?}"),
        }
        assert!(err.is_retryable());

        let err = map_http_error(StatusCode::BAD_REQUEST, "plain".to_string());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("plain"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let agent = GeminiApiAgent::with_base_url("http://localhost:8080/models/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            agent.endpoint("gemini-2.5-flash"),
            "http://localhost:8080/models/gemini-2.5-flash:generateContent"
        );
    }
}
