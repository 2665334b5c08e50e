//! Service entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::ContentRecord;
use crate::core::ordering::Orderable;

/// A service offered by the agency, shown on the services page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    pub description: String,

    /// Icon identifier the frontend maps to an SVG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl ContentRecord for Service {
    const TABLE: &'static str = "services";
    const NAME: &'static str = "service";
    const NAME_PLURAL: &'static str = "services";
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

impl Orderable for Service {
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

impl Service {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: None,
            title,
            description,
            icon: None,
            order: Some(0),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_defaults_to_true() {
        let row = serde_json::json!({ "title": "SEO audits", "description": "d" });
        let service: Service = serde_json::from_value(row).unwrap();
        assert!(service.is_active);
    }

    #[test]
    fn test_decodes_null_order() {
        let row = serde_json::json!({
            "id": "s1",
            "title": "SEO audits",
            "description": "d",
            "icon": null,
            "order": null,
            "is_active": false
        });
        let service: Service = serde_json::from_value(row).unwrap();
        assert_eq!(service.order, None);
        assert!(!service.is_active);
    }
}
