//! Testimonial entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::ContentRecord;
use crate::core::ordering::Orderable;

/// A client testimonial. `name` is the person quoted; `subtitle` their
/// role or company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub quote: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

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

impl ContentRecord for Testimonial {
    const TABLE: &'static str = "testimonials";
    const NAME: &'static str = "testimonial";
    const NAME_PLURAL: &'static str = "testimonials";
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

impl Orderable for Testimonial {
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

impl Testimonial {
    pub fn new(quote: String, name: String) -> Self {
        Self {
            id: None,
            quote,
            name,
            subtitle: None,
            order: Some(0),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }
}
