//! Domain DTOs for the item API.
//!
//! # Design
//! A single `Item` type serves as both the draft held by the create form and
//! the persisted record returned by the server. `id` is the only thing that
//! distinguishes the two. Timestamps are server-owned and kept as opaque
//! strings; the client never parses or compares them.
//!
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// The single resource managed by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-assigned on creation. `None` for a draft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Item {
    /// A new unsaved item.
    pub fn draft(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            ..Self::default()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the name is non-empty after trimming, the only check the client
    /// performs before submitting.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_serializes_without_server_fields() {
        let draft = Item::draft("Book", Some("A book".to_string()));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Book", "description": "A book"}));
    }

    #[test]
    fn persisted_item_uses_camel_case_timestamps() {
        let item: Item = serde_json::from_str(
            r#"{"id":3,"name":"Lamp","description":null,"createdAt":"2024-05-01T10:00:00","updatedAt":"2024-05-02T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(item.id, Some(3));
        assert!(item.is_persisted());
        assert!(item.description.is_none());
        assert_eq!(item.created_at.as_deref(), Some("2024-05-01T10:00:00"));
        assert_eq!(item.updated_at.as_deref(), Some("2024-05-02T10:00:00"));
    }

    #[test]
    fn missing_name_is_rejected() {
        let result: Result<Item, _> = serde_json::from_str(r#"{"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn whitespace_name_does_not_count() {
        assert!(!Item::draft("   \t", None).has_name());
        assert!(!Item::default().has_name());
        assert!(Item::draft(" Widget ", None).has_name());
    }
}
