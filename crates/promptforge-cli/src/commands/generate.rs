use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use promptforge_application::GenerationController;
use promptforge_core::generation::GenerationOutcome;
use promptforge_core::request::{PromptType, SkillLevel, Tone};
use promptforge_core::template::find_template;
use promptforge_infrastructure::{ForgePaths, MarkdownExporter, copy_to_clipboard};

use super::{parse_level, parse_prompt_type, parse_tone, print_outcome};
use crate::context::AppContext;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// What you want the AI to do
    pub idea: Option<String>,

    /// Start from a starter template (see `promptforge templates`)
    #[arg(long, conflicts_with = "idea")]
    pub template: Option<String>,

    /// Prompt type: chatbot, image, code, writing, data
    #[arg(long = "type", value_parser = parse_prompt_type)]
    pub prompt_type: Option<PromptType>,

    /// Tone: formal, casual, professional
    #[arg(long, value_parser = parse_tone, default_value = "professional")]
    pub tone: Tone,

    /// Skill level: beginner, intermediate, expert
    #[arg(long, value_parser = parse_level, default_value = "beginner")]
    pub level: SkillLevel,

    #[command(flatten)]
    pub delivery: DeliveryArgs,
}

/// What to do with a successful result besides printing it.
#[derive(Debug, Default, Args)]
pub struct DeliveryArgs {
    /// Save the result as markdown (default: the download directory)
    #[arg(long, value_name = "DIR")]
    pub export: Option<Option<PathBuf>>,

    /// Copy the result to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> Result<()> {
    let (idea, template_type) = match &args.template {
        Some(title) => match find_template(title) {
            Some(template) => (template.idea.to_string(), Some(template.prompt_type)),
            None => bail!("Unknown template '{}'. Run `promptforge templates` to list them.", title),
        },
        None => (args.idea.clone().unwrap_or_default(), None),
    };
    let prompt_type = args.prompt_type.or(template_type).unwrap_or_default();

    let outcome = with_progress(&ctx.controller, ctx.controller.submit(
        &idea,
        prompt_type,
        args.tone,
        args.level,
    ))
    .await?;

    print_outcome(&outcome, ctx.controller.metrics())?;
    deliver(&outcome, &args.delivery);
    Ok(())
}

/// Drives `work` while reporting the controller's `Loading` state on stderr.
pub async fn with_progress<F, T>(controller: &GenerationController, work: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let mut rx = controller.subscribe();
    tokio::pin!(work);
    loop {
        tokio::select! {
            result = &mut work => return result,
            Ok(()) = rx.changed() => {
                if rx.borrow_and_update().is_loading() {
                    eprintln!("{}", "Optimizing prompt...".bright_black());
                }
            }
        }
    }
}

/// Exports and copies a successful result. Failures are reported, never fatal.
pub fn deliver(outcome: &GenerationOutcome, delivery: &DeliveryArgs) {
    let Some(text) = outcome.result() else {
        return;
    };

    if let Some(dir) = &delivery.export {
        let dir = dir.clone().unwrap_or_else(ForgePaths::default_export_dir);
        match MarkdownExporter::new(dir).export(text, Utc::now()) {
            Ok(path) => println!("{} {}", "Saved to".green(), path.display()),
            Err(e) => eprintln!("{} {}", "Export failed:".yellow(), e),
        }
    }

    if delivery.copy {
        match copy_to_clipboard(text) {
            Ok(()) => println!("{}", "Copied to clipboard.".green()),
            Err(e) => eprintln!("{} {}", "Copy failed:".yellow(), e),
        }
    }
}
