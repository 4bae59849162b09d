pub mod analysis;
pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod request;
pub mod secret;
pub mod template;

// Re-export common types
pub use analysis::{PromptMetrics, analyze};
pub use error::{ForgeError, GenerationError, PersistenceError, ValidationError};
pub use generation::{GenerationOutcome, PromptGenerator, SamplingConfig};
pub use history::{HistoryItem, HistoryStore, KeyValueStore};
pub use request::{PromptRequest, PromptType, RequestBuilder, SkillLevel, Tone};
