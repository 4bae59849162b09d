//! Lightweight display metrics derived from a generated prompt.

use serde::{Deserialize, Serialize};

use crate::generation::GenerationOutcome;

/// Highest complexity score reported.
pub const MAX_COMPLEXITY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptMetrics {
    /// Length in hundreds of characters, rounded half up, capped at 10.
    pub complexity_score: u8,
    /// Has a `Role:` marker plus either `Constraints:` or `Goal:`.
    pub is_structured: bool,
    /// Mentions "format" in any letter case.
    pub has_format_section: bool,
}

/// Computes metrics for a generated text. Pure; cheap enough to rerun on
/// every change of the displayed result.
pub fn analyze(text: &str) -> PromptMetrics {
    let length = text.chars().count();
    let complexity_score = ((length + 50) / 100).min(MAX_COMPLEXITY as usize) as u8;

    let is_structured =
        text.contains("Role:") && (text.contains("Constraints:") || text.contains("Goal:"));
    let has_format_section = text.to_lowercase().contains("format");

    PromptMetrics {
        complexity_score,
        is_structured,
        has_format_section,
    }
}

/// Metrics for the current outcome; `None` unless it holds a result.
pub fn analyze_outcome(outcome: &GenerationOutcome) -> Option<PromptMetrics> {
    outcome.result().map(analyze)
}
