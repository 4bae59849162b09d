//! History item domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::PromptRequest;

/// A past generation: the request, the text it produced and when.
///
/// Items are immutable once created; the store only ever inserts or
/// deletes whole items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    id: String,
    request: PromptRequest,
    result: String,
    /// Creation instant in milliseconds since the Unix epoch.
    timestamp: i64,
}

impl HistoryItem {
    /// Creates a new item with a fresh UUID and the current time.
    pub fn new(request: PromptRequest, result: impl Into<String>) -> Self {
        Self::with_parts(
            Uuid::new_v4().to_string(),
            request,
            result,
            Utc::now().timestamp_millis(),
        )
    }

    /// Reassembles an item from its stored parts.
    pub fn with_parts(
        id: impl Into<String>,
        request: PromptRequest,
        result: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            request,
            result: result.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn request(&self) -> &PromptRequest {
        &self.request
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The creation instant as a UTC datetime, if the stored value is in range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub(crate) fn clamp_timestamp(&mut self, floor: i64) {
        if self.timestamp < floor {
            self.timestamp = floor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBuilder;

    #[test]
    fn test_new_items_get_unique_ids() {
        let request = RequestBuilder::new("idea").build().unwrap();
        let a = HistoryItem::new(request.clone(), "one");
        let b = HistoryItem::new(request, "two");
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_persisted_shape() {
        let request = RequestBuilder::new("idea").build().unwrap();
        let item = HistoryItem::with_parts("id-1", request, "text", 1_700_000_000_000);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "id-1");
        assert_eq!(json["result"], "text");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["request"]["type"], "Chatbot");
        assert!(item.created_at().is_some());
    }
}
