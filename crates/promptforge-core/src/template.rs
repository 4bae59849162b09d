//! Starter ideas a user can pick to pre-fill the idea field.

use crate::request::{PromptType, RequestBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub title: &'static str,
    pub idea: &'static str,
    pub prompt_type: PromptType,
}

impl PromptTemplate {
    /// A form pre-filled with this template's idea and type.
    pub fn to_builder(&self) -> RequestBuilder {
        RequestBuilder::new(self.idea).prompt_type(self.prompt_type)
    }
}

pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        title: "Customer Support Bot",
        idea: "A friendly support assistant for an online store that answers questions about orders, shipping and returns.",
        prompt_type: PromptType::Chatbot,
    },
    PromptTemplate {
        title: "Product Photo",
        idea: "A studio-quality product photo of a minimalist ceramic coffee mug on a wooden table in soft morning light.",
        prompt_type: PromptType::ImageGeneration,
    },
    PromptTemplate {
        title: "REST API Endpoint",
        idea: "Write a REST endpoint that lets users upload a profile picture, validates the file and stores it.",
        prompt_type: PromptType::CodeGeneration,
    },
    PromptTemplate {
        title: "Blog Post",
        idea: "A blog post explaining the benefits of remote work for small teams, with practical tips.",
        prompt_type: PromptType::Writing,
    },
    PromptTemplate {
        title: "Sales Report",
        idea: "Analyze monthly sales data to find the best-selling products and seasonal trends.",
        prompt_type: PromptType::DataAnalysis,
    },
];

/// Looks up a template by title, ignoring case.
pub fn find_template(title: &str) -> Option<&'static PromptTemplate> {
    PROMPT_TEMPLATES
        .iter()
        .find(|t| t.title.eq_ignore_ascii_case(title.trim()))
}
