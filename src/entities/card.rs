//! Offer card entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::ContentRecord;
use crate::core::ordering::Orderable;

/// A card in the home page offer stack.
///
/// `highlight_start`/`highlight_end` are character offsets into `title`
/// marking the span the frontend renders in the accent color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_start: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_end: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl ContentRecord for Card {
    const TABLE: &'static str = "cards";
    const NAME: &'static str = "card";
    const NAME_PLURAL: &'static str = "cards";
    const HAS_TIMESTAMPS: bool = true;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_title(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Orderable for Card {
    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn order(&self) -> Option<i64> {
        self.order
    }

    fn set_order(&mut self, value: i64) {
        self.order = Some(value);
    }
}

impl Card {
    pub fn new(title: String) -> Self {
        Self {
            id: None,
            title,
            subtitle: None,
            description: None,
            icon: None,
            order: Some(0),
            is_active: true,
            highlight_start: None,
            highlight_end: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_span_is_optional() {
        let row = serde_json::json!({ "title": "Grow faster" });
        let card: Card = serde_json::from_value(row).unwrap();
        assert_eq!(card.highlight_start, None);
        assert_eq!(card.highlight_end, None);
    }
}
