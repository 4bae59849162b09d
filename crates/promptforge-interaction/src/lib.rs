//! Outbound LLM integration for PromptForge.
//!
//! [`GenerationClient`] implements the core `PromptGenerator` contract on top
//! of a [`GenerationBackend`], with [`GeminiApiAgent`] as the HTTP backend.

pub mod gemini_api_agent;
pub mod generation_client;
pub mod presets;

pub use gemini_api_agent::{GeminiApiAgent, GeminiApiError, GenerationBackend, GenerationCall};
pub use generation_client::GenerationClient;
pub use presets::default_system_instruction;
