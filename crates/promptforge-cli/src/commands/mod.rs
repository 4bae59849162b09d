pub mod generate;
pub mod history;
pub mod init;
pub mod templates;

use anyhow::{Result, bail};
use colored::Colorize;
use promptforge_core::analysis::PromptMetrics;
use promptforge_core::generation::GenerationOutcome;
use promptforge_core::request::{PromptType, SkillLevel, Tone};

/// Prints a settled outcome. An error outcome becomes the command's error.
pub fn print_outcome(outcome: &GenerationOutcome, metrics: Option<PromptMetrics>) -> Result<()> {
    match outcome {
        GenerationOutcome::Success(text) => {
            println!("{}", "Optimized prompt".bright_green().bold());
            println!();
            for line in text.lines() {
                println!("{}", line);
            }
            println!();
            if let Some(metrics) = metrics {
                print_metrics(&metrics);
            }
            Ok(())
        }
        GenerationOutcome::Error(message) => bail!("{}", message),
        GenerationOutcome::Idle | GenerationOutcome::Loading => Ok(()),
    }
}

fn print_metrics(metrics: &PromptMetrics) {
    println!(
        "{} {}/10   {} {}   {} {}",
        "Complexity:".bright_black(),
        metrics.complexity_score,
        "Structured:".bright_black(),
        yes_no(metrics.is_structured),
        "Format section:".bright_black(),
        yes_no(metrics.has_format_section),
    );
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value { "yes".green() } else { "no".yellow() }
}

pub fn parse_prompt_type(s: &str) -> std::result::Result<PromptType, String> {
    PromptType::from_str(s).ok_or_else(|| {
        invalid_choice(s, PromptType::all().iter().map(PromptType::as_str))
    })
}

pub fn parse_tone(s: &str) -> std::result::Result<Tone, String> {
    Tone::from_str(s).ok_or_else(|| invalid_choice(s, Tone::all().iter().map(Tone::as_str)))
}

pub fn parse_level(s: &str) -> std::result::Result<SkillLevel, String> {
    SkillLevel::from_str(s)
        .ok_or_else(|| invalid_choice(s, SkillLevel::all().iter().map(SkillLevel::as_str)))
}

fn invalid_choice<'a>(value: &str, choices: impl Iterator<Item = &'a str>) -> String {
    format!(
        "invalid value '{}', expected one of: {}",
        value,
        choices.collect::<Vec<_>>().join(", ")
    )
}

/// Shortens `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(parse_prompt_type("image").unwrap(), PromptType::ImageGeneration);
        assert_eq!(parse_prompt_type("Data Analysis").unwrap(), PromptType::DataAnalysis);
        assert_eq!(parse_tone("FORMAL").unwrap(), Tone::Formal);
        assert_eq!(parse_level("expert").unwrap(), SkillLevel::Expert);

        let err = parse_tone("angry").unwrap_err();
        assert!(err.contains("Formal, Casual, Professional"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line one\nline two", 40), "line one line two");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_error_outcome_is_an_error() {
        let outcome = GenerationOutcome::Error("Failed to communicate with Gemini AI.".to_string());
        let err = print_outcome(&outcome, None).unwrap_err();
        assert_eq!(err.to_string(), "Failed to communicate with Gemini AI.");
    }
}
