//! Chat history entries and their replay form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::engine::templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

/// One stored history entry, as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub role: Role,
    #[serde(default)]
    pub text: String,
}

/// Structured payloads a user turn can carry instead of typed prose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuredRequest {
    ProductDetail { data: Product },
}

impl StructuredRequest {
    /// The human question this request stands for.
    pub fn as_question(&self) -> String {
        match self {
            Self::ProductDetail { data } => templates::detail_question(&data.title),
        }
    }
}

impl HistoryEntry {
    /// Replay form: a user entry that is a JSON-encoded structured request
    /// renders as its human question, never as raw JSON.
    pub fn display_text(&self) -> String {
        if self.role == Role::User {
            if let Ok(request) = serde_json::from_str::<StructuredRequest>(&self.text) {
                return request.as_question();
            }
        }
        self.text.clone()
    }
}

/// A rendered chat message as the session hands it to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self::new(entry.role, entry.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_use_lowercase_wire_names() {
        let entry: HistoryEntry =
            serde_json::from_value(json!({"role": "ai", "text": "hello"})).unwrap();
        assert_eq!(entry.role, Role::Ai);

        let entry: HistoryEntry = serde_json::from_value(json!({"role": "user"})).unwrap();
        assert_eq!(entry.role, Role::User);
        assert!(entry.text.is_empty());
    }

    #[test]
    fn structured_user_entry_replays_as_a_question() {
        let entry = HistoryEntry {
            role: Role::User,
            text: r#"{"type":"product_detail","data":{"title":"Kemeja Flanel"}}"#.to_string(),
        };
        assert_eq!(
            entry.display_text(),
            "Could I see the details for Kemeja Flanel?"
        );
    }

    #[test]
    fn plain_user_entry_replays_unchanged() {
        let entry = HistoryEntry {
            role: Role::User,
            text: "do you have flannel shirts?".to_string(),
        };
        assert_eq!(entry.display_text(), "do you have flannel shirts?");
    }

    #[test]
    fn ai_entries_are_never_rewritten() {
        let raw = r#"{"type":"product_detail","data":{"title":"Kemeja Flanel"}}"#;
        let entry = HistoryEntry {
            role: Role::Ai,
            text: raw.to_string(),
        };
        assert_eq!(entry.display_text(), raw);
    }
}
