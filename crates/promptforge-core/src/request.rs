//! Prompt request domain model.
//!
//! A `PromptRequest` is the normalized user intent submitted for generation:
//! the free-text idea plus three categorical choices. Values are only created
//! through validation, so every request in the system holds a trimmed,
//! non-empty idea of bounded length.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum idea length, counted in characters.
pub const MAX_IDEA_CHARS: usize = 1000;

/// The kind of prompt the user wants optimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PromptType {
    #[default]
    #[serde(rename = "Chatbot")]
    Chatbot,
    #[serde(rename = "Image Generation")]
    ImageGeneration,
    #[serde(rename = "Code Generation")]
    CodeGeneration,
    #[serde(rename = "Writing")]
    Writing,
    #[serde(rename = "Data Analysis")]
    DataAnalysis,
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Chatbot => "Chatbot",
            PromptType::ImageGeneration => "Image Generation",
            PromptType::CodeGeneration => "Code Generation",
            PromptType::Writing => "Writing",
            PromptType::DataAnalysis => "Data Analysis",
        }
    }

    /// Parses a prompt type leniently: case, spaces, `-` and `_` are ignored,
    /// and the short forms `image`, `code` and `data` are accepted.
    pub fn from_str(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "chatbot" | "chat" => Some(PromptType::Chatbot),
            "imagegeneration" | "image" => Some(PromptType::ImageGeneration),
            "codegeneration" | "code" => Some(PromptType::CodeGeneration),
            "writing" => Some(PromptType::Writing),
            "dataanalysis" | "data" => Some(PromptType::DataAnalysis),
            _ => None,
        }
    }

    pub fn all() -> Vec<PromptType> {
        vec![
            PromptType::Chatbot,
            PromptType::ImageGeneration,
            PromptType::CodeGeneration,
            PromptType::Writing,
            PromptType::DataAnalysis,
        ]
    }
}

/// The tone the optimized prompt should ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    Formal,
    Casual,
    #[default]
    Professional,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Casual => "Casual",
            Tone::Professional => "Professional",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "formal" => Some(Tone::Formal),
            "casual" => Some(Tone::Casual),
            "professional" => Some(Tone::Professional),
            _ => None,
        }
    }

    pub fn all() -> Vec<Tone> {
        vec![Tone::Formal, Tone::Casual, Tone::Professional]
    }
}

/// The skill level of the person who will use the generated prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Expert => "Expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "expert" => Some(SkillLevel::Expert),
            _ => None,
        }
    }

    pub fn all() -> Vec<SkillLevel> {
        vec![
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Expert,
        ]
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// An immutable, validated generation request.
///
/// Deserialization goes through [`PromptRequest::build`], so stored requests
/// obey the same rules as fresh form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPromptRequest")]
pub struct PromptRequest {
    idea: String,
    #[serde(rename = "type")]
    prompt_type: PromptType,
    tone: Tone,
    level: SkillLevel,
}

impl PromptRequest {
    /// Validates and normalizes raw form input.
    ///
    /// The idea is trimmed; an empty result fails with `EmptyIdea`, and an
    /// idea longer than [`MAX_IDEA_CHARS`] characters fails with `IdeaTooLong`.
    pub fn build(
        idea: &str,
        prompt_type: PromptType,
        tone: Tone,
        level: SkillLevel,
    ) -> Result<Self, ValidationError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(ValidationError::EmptyIdea);
        }

        let length = idea.chars().count();
        if length > MAX_IDEA_CHARS {
            return Err(ValidationError::IdeaTooLong {
                length,
                max: MAX_IDEA_CHARS,
            });
        }

        Ok(Self {
            idea: idea.to_string(),
            prompt_type,
            tone,
            level,
        })
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn prompt_type(&self) -> PromptType {
        self.prompt_type
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn level(&self) -> SkillLevel {
        self.level
    }

    /// Deterministic rendering of the request sent as the user turn.
    pub fn to_user_message(&self) -> String {
        format!(
            "User Idea: {}\nPrompt Type: {}\nTone: {}\nSkill Level: {}\n",
            self.idea,
            self.prompt_type.as_str(),
            self.tone.as_str(),
            self.level.as_str()
        )
    }
}

/// Wire shape of a [`PromptRequest`] before validation.
#[derive(Deserialize)]
struct RawPromptRequest {
    idea: String,
    #[serde(rename = "type")]
    prompt_type: PromptType,
    tone: Tone,
    level: SkillLevel,
}

impl TryFrom<RawPromptRequest> for PromptRequest {
    type Error = ValidationError;

    fn try_from(raw: RawPromptRequest) -> Result<Self, Self::Error> {
        PromptRequest::build(&raw.idea, raw.prompt_type, raw.tone, raw.level)
    }
}

/// Collects form state and turns it into a [`PromptRequest`].
///
/// Unset categorical fields fall back to the form defaults
/// (Chatbot, Professional, Beginner).
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    idea: String,
    prompt_type: PromptType,
    tone: Tone,
    level: SkillLevel,
}

impl RequestBuilder {
    pub fn new(idea: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            ..Self::default()
        }
    }

    /// Pre-fills the form from an existing request (e.g. a history item).
    pub fn from_request(request: &PromptRequest) -> Self {
        Self {
            idea: request.idea.clone(),
            prompt_type: request.prompt_type,
            tone: request.tone,
            level: request.level,
        }
    }

    pub fn idea(mut self, idea: impl Into<String>) -> Self {
        self.idea = idea.into();
        self
    }

    pub fn prompt_type(mut self, prompt_type: PromptType) -> Self {
        self.prompt_type = prompt_type;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn level(mut self, level: SkillLevel) -> Self {
        self.level = level;
        self
    }

    /// Validates the collected input. The builder itself is left untouched.
    pub fn build(&self) -> Result<PromptRequest, ValidationError> {
        PromptRequest::build(&self.idea, self.prompt_type, self.tone, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_trims_idea() {
        let request = PromptRequest::build(
            "  build a chatbot \n",
            PromptType::Chatbot,
            Tone::Professional,
            SkillLevel::Beginner,
        )
        .unwrap();
        assert_eq!(request.idea(), "build a chatbot");
        assert_eq!(request.prompt_type(), PromptType::Chatbot);
    }

    #[test]
    fn test_build_rejects_blank_ideas() {
        for idea in ["", "   ", "\n\t  \r\n"] {
            let result = RequestBuilder::new(idea).build();
            assert_eq!(result, Err(ValidationError::EmptyIdea), "idea {idea:?}");
        }
    }

    #[test]
    fn test_build_enforces_length_in_characters() {
        let at_limit = "é".repeat(MAX_IDEA_CHARS);
        assert!(RequestBuilder::new(at_limit).build().is_ok());

        let over = "a".repeat(MAX_IDEA_CHARS + 1);
        assert_eq!(
            RequestBuilder::new(over).build(),
            Err(ValidationError::IdeaTooLong {
                length: MAX_IDEA_CHARS + 1,
                max: MAX_IDEA_CHARS
            })
        );
    }

    #[test]
    fn test_builder_defaults_and_does_not_mutate() {
        let builder = RequestBuilder::new(" idea ");
        let request = builder.build().unwrap();
        assert_eq!(request.prompt_type(), PromptType::Chatbot);
        assert_eq!(request.tone(), Tone::Professional);
        assert_eq!(request.level(), SkillLevel::Beginner);
        // Builder keeps the raw input
        assert_eq!(builder.idea, " idea ");
    }

    #[test]
    fn test_user_message_rendering() {
        let request = RequestBuilder::new("summarize sales data")
            .prompt_type(PromptType::DataAnalysis)
            .tone(Tone::Formal)
            .level(SkillLevel::Expert)
            .build()
            .unwrap();
        assert_eq!(
            request.to_user_message(),
            "User Idea: summarize sales data\nPrompt Type: Data Analysis\nTone: Formal\nSkill Level: Expert\n"
        );
    }

    #[test]
    fn test_enum_parsing_is_lenient() {
        assert_eq!(PromptType::from_str("image-generation"), Some(PromptType::ImageGeneration));
        assert_eq!(PromptType::from_str("Code Generation"), Some(PromptType::CodeGeneration));
        assert_eq!(PromptType::from_str("data"), Some(PromptType::DataAnalysis));
        assert_eq!(PromptType::from_str("poetry"), None);
        assert_eq!(Tone::from_str("CASUAL"), Some(Tone::Casual));
        assert_eq!(SkillLevel::from_str("expert"), Some(SkillLevel::Expert));
    }

    #[test]
    fn test_serialized_form_uses_display_names() {
        let request = RequestBuilder::new("draw a cat")
            .prompt_type(PromptType::ImageGeneration)
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "Image Generation");
        assert_eq!(json["tone"], "Professional");
        assert_eq!(json["level"], "Beginner");
        assert_eq!(json["idea"], "draw a cat");
    }

    #[test]
    fn test_deserialize_validates_the_idea() {
        let request: PromptRequest = serde_json::from_str(
            r#"{"idea": "  draw a cat ", "type": "Image Generation", "tone": "Casual", "level": "Expert"}"#,
        )
        .unwrap();
        assert_eq!(request.idea(), "draw a cat");
        assert_eq!(request.prompt_type(), PromptType::ImageGeneration);

        let blank = r#"{"idea": "   ", "type": "Chatbot", "tone": "Formal", "level": "Beginner"}"#;
        let err = serde_json::from_str::<PromptRequest>(blank).unwrap_err();
        assert!(err.to_string().contains("Please describe"));

        let long = serde_json::json!({
            "idea": "a".repeat(MAX_IDEA_CHARS + 1),
            "type": "Chatbot",
            "tone": "Formal",
            "level": "Beginner",
        });
        assert!(serde_json::from_value::<PromptRequest>(long).is_err());
    }
}
