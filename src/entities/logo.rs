//! Client logo entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::ContentRecord;
use crate::core::ordering::Orderable;

/// A client logo in the home page carousel. `logo_url` points at an object
/// in the logo storage bucket; deleting the row also deletes that object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientLogo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    pub logo_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

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

impl ContentRecord for ClientLogo {
    const TABLE: &'static str = "client_logos";
    const NAME: &'static str = "logo";
    const NAME_PLURAL: &'static str = "logos";
    const HAS_TIMESTAMPS: bool = true;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_title(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Orderable for ClientLogo {
    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn order(&self) -> Option<i64> {
        self.order
    }

    fn set_order(&mut self, value: i64) {
        self.order = Some(value);
    }
}

impl ClientLogo {
    pub fn new(name: String, logo_url: String) -> Self {
        Self {
            id: None,
            name,
            logo_url,
            website_url: None,
            order: Some(0),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }
}
