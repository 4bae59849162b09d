//! Generation use case: request -> remote call -> outcome + history.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use promptforge_core::analysis::{PromptMetrics, analyze_outcome};
use promptforge_core::error::{ForgeError, Result, ValidationError};
use promptforge_core::generation::{GenerationOutcome, PromptGenerator};
use promptforge_core::history::{HistoryItem, HistoryStore};
use promptforge_core::request::{PromptRequest, PromptType, RequestBuilder, SkillLevel, Tone};
use tokio::sync::{RwLock, watch};

use crate::status::StatusNotice;

/// Owns the generation state machine and the session's history.
///
/// The observable outcome moves `Idle -> Loading -> Success | Error`. Calls may
/// overlap: every call draws a ticket, and only the most recently started
/// call (or a later `restore`/`dismiss`) decides what observers see. Each
/// successful call still records its own history entry, whichever finishes
/// last.
pub struct GenerationController {
    generator: Arc<dyn PromptGenerator>,
    history: RwLock<HistoryStore>,
    outcome: watch::Sender<GenerationOutcome>,
    latest_ticket: AtomicU64,
}

impl GenerationController {
    /// Creates a controller starting in `Idle` over an opened history.
    pub fn new(generator: Arc<dyn PromptGenerator>, history: HistoryStore) -> Self {
        let (outcome, _) = watch::channel(GenerationOutcome::Idle);
        Self {
            generator,
            history: RwLock::new(history),
            outcome,
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Runs one generation for an already validated request.
    ///
    /// Returns this call's own outcome, even when a newer call has taken over
    /// the observable state in the meantime.
    pub async fn run_generation(&self, request: PromptRequest) -> GenerationOutcome {
        let ticket = self.next_ticket();
        self.publish(ticket, GenerationOutcome::Loading);
        tracing::info!(
            ticket,
            prompt_type = request.prompt_type().as_str(),
            "Generation started"
        );

        let outcome = match self.generator.generate(&request).await {
            Ok(text) => {
                let item = HistoryItem::new(request, text.clone());
                let item_id = item.id().to_string();
                let len = {
                    let mut history = self.history.write().await;
                    history.append(item);
                    history.len()
                };
                tracing::info!(ticket, %item_id, len, "Generation succeeded");
                GenerationOutcome::Success(text)
            }
            Err(e) => {
                tracing::warn!(ticket, "Generation failed: {:?}", e);
                GenerationOutcome::Error(e.to_string())
            }
        };

        if !self.publish(ticket, outcome.clone()) {
            tracing::debug!(ticket, "Outcome superseded by a newer generation");
        }
        outcome
    }

    /// Validates form input and runs the generation.
    ///
    /// A validation failure returns immediately and leaves the observable
    /// state untouched.
    pub async fn submit(
        &self,
        idea: &str,
        prompt_type: PromptType,
        tone: Tone,
        level: SkillLevel,
    ) -> std::result::Result<GenerationOutcome, ValidationError> {
        let request = RequestBuilder::new(idea)
            .prompt_type(prompt_type)
            .tone(tone)
            .level(level)
            .build()?;
        Ok(self.run_generation(request).await)
    }

    /// Re-runs the request stored in a history entry.
    ///
    /// The stored entry is left as is; a success adds a new entry.
    pub async fn replay(&self, id: &str) -> Result<GenerationOutcome> {
        let request = self
            .history
            .read()
            .await
            .get(id)
            .map(|item| item.request().clone())
            .ok_or_else(|| ForgeError::not_found("HistoryItem", id))?;

        tracing::info!(item_id = %id, "Replaying history entry");
        Ok(self.run_generation(request).await)
    }

    /// Shows a stored result without calling the generator.
    pub async fn restore(&self, id: &str) -> Result<HistoryItem> {
        let item = self
            .history
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ForgeError::not_found("HistoryItem", id))?;

        let ticket = self.next_ticket();
        self.publish(ticket, GenerationOutcome::Success(item.result().to_string()));
        Ok(item)
    }

    /// Returns the observable state to `Idle`.
    pub fn dismiss(&self) {
        let ticket = self.next_ticket();
        self.publish(ticket, GenerationOutcome::Idle);
    }

    /// Snapshot of the observable state.
    pub fn outcome(&self) -> GenerationOutcome {
        self.outcome.borrow().clone()
    }

    /// Receiver notified on every observable state change.
    pub fn subscribe(&self) -> watch::Receiver<GenerationOutcome> {
        self.outcome.subscribe()
    }

    /// Metrics for the displayed result, `None` unless it is a success.
    pub fn metrics(&self) -> Option<PromptMetrics> {
        analyze_outcome(&self.outcome.borrow())
    }

    /// History entries, newest first.
    pub async fn history(&self) -> Vec<HistoryItem> {
        self.history.read().await.items().to_vec()
    }

    pub async fn history_item(&self, id: &str) -> Option<HistoryItem> {
        self.history.read().await.get(id).cloned()
    }

    /// Deletes one entry. Unknown ids are ignored.
    pub async fn delete_history_item(&self, id: &str) -> StatusNotice {
        let removed = self.history.write().await.remove(id);
        tracing::info!(item_id = %id, removed, "History entry deleted");
        StatusNotice::entry_deleted()
    }

    pub async fn clear_history(&self) -> StatusNotice {
        self.history.write().await.clear();
        tracing::info!("History cleared");
        StatusNotice::history_cleared()
    }

    fn next_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Stores `outcome` unless a newer ticket has been drawn.
    ///
    /// The ticket is compared inside the channel's lock so a stale call can
    /// never overwrite the state of a call that started after it.
    fn publish(&self, ticket: u64, outcome: GenerationOutcome) -> bool {
        self.outcome.send_if_modified(|current| {
            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *current = outcome;
            true
        })
    }
}
