use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use chrono::Local;
use clap::Subcommand;
use colored::Colorize;
use promptforge_core::history::HistoryItem;

use super::generate::{DeliveryArgs, deliver, with_progress};
use super::{print_outcome, truncate};
use crate::context::AppContext;

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List past generations, newest first
    List,
    /// Show a stored result
    Show {
        /// Entry id or a unique prefix of it
        id: String,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },
    /// Run a stored request again and record the new result
    Replay {
        id: String,
        #[command(flatten)]
        delivery: DeliveryArgs,
    },
    /// Delete one entry
    Delete { id: String },
    /// Delete every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(ctx: &AppContext, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => list(ctx).await,
        HistoryAction::Show { id, delivery } => {
            let id = resolve_id(&ctx.controller.history().await, &id)?;
            let item = ctx.controller.restore(&id).await?;
            print_header(&item);
            let outcome = ctx.controller.outcome();
            print_outcome(&outcome, ctx.controller.metrics())?;
            deliver(&outcome, &delivery);
            Ok(())
        }
        HistoryAction::Replay { id, delivery } => {
            let id = resolve_id(&ctx.controller.history().await, &id)?;
            let outcome = with_progress(&ctx.controller, ctx.controller.replay(&id)).await?;
            print_outcome(&outcome, ctx.controller.metrics())?;
            deliver(&outcome, &delivery);
            Ok(())
        }
        HistoryAction::Delete { id } => {
            let id = resolve_id(&ctx.controller.history().await, &id)?;
            let notice = ctx.controller.delete_history_item(&id).await;
            println!("{}", notice.to_string().green());
            Ok(())
        }
        HistoryAction::Clear { yes } => {
            if !yes && !confirm("Are you sure you want to clear all history? This action is permanent.")? {
                println!("{}", "Cancelled.".bright_black());
                return Ok(());
            }
            let notice = ctx.controller.clear_history().await;
            println!("{}", notice.to_string().green());
            Ok(())
        }
    }
}

async fn list(ctx: &AppContext) -> Result<()> {
    let items = ctx.controller.history().await;
    if items.is_empty() {
        println!("{}", "No history yet.".bright_black());
        return Ok(());
    }

    for item in &items {
        println!(
            "{}  {}  {:<16}  {}",
            short_id(item.id()).bright_cyan(),
            format_time(item).bright_black(),
            item.request().prompt_type().as_str(),
            truncate(item.request().idea(), 60),
        );
    }
    Ok(())
}

fn print_header(item: &HistoryItem) {
    let request = item.request();
    println!("{} {}", "Idea:".bright_black(), request.idea());
    println!(
        "{} {} / {} / {}   {}",
        "Options:".bright_black(),
        request.prompt_type().as_str(),
        request.tone().as_str(),
        request.level().as_str(),
        format_time(item).bright_black(),
    );
    println!();
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn format_time(item: &HistoryItem) -> String {
    item.created_at()
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Matches a full id, or a prefix shared by exactly one entry.
fn resolve_id(items: &[HistoryItem], input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("History id must not be empty");
    }
    if let Some(item) = items.iter().find(|item| item.id() == input) {
        return Ok(item.id().to_string());
    }

    let matches: Vec<&HistoryItem> = items
        .iter()
        .filter(|item| item.id().starts_with(input))
        .collect();
    match matches.as_slice() {
        [item] => Ok(item.id().to_string()),
        [] => bail!("No history entry matches '{}'", input),
        _ => bail!("'{}' matches {} entries, use a longer id", input, matches.len()),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question.yellow());
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
