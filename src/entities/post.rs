//! Blog post entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::ContentRecord;
use crate::core::ordering::Orderable;
use crate::core::slug::slugify;

/// A post on the insights blog.
///
/// `content` is rich-text HTML straight from the editor; it is sanitized
/// on render, not on write. `slug` is derived from the title at creation
/// and then frozen - it is the post's public URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    pub title: String,

    pub slug: String,

    /// Teaser shown on the blog listing page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Full body as rich-text HTML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Header image URL (public storage URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    /// Category name, matching a `blog_categories` row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl ContentRecord for Post {
    const TABLE: &'static str = "posts";
    const NAME: &'static str = "post";
    const NAME_PLURAL: &'static str = "posts";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_title(&self) -> &str {
        &self.title
    }
}

impl Orderable for Post {
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

impl Post {
    /// Build a new post with a derived slug; new posts start at order 0
    /// and float to a real position on the next reorder.
    pub fn new(title: String) -> Self {
        let slug = slugify(&title);
        Self {
            id: None,
            created_at: None,
            title,
            slug,
            short_description: None,
            content: None,
            img_url: None,
            tag: None,
            order: Some(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_slug() {
        let post = Post::new("Why Brand Voice Matters!".to_string());
        assert_eq!(post.slug, "why-brand-voice-matters");
        assert_eq!(post.order, Some(0));
    }

    #[test]
    fn test_decodes_backend_row() {
        let row = serde_json::json!({
            "id": "3c9f4d0e-8a52-4c7a-9a8e-2f1f2a9b6c01",
            "created_at": "2025-02-11T09:30:00Z",
            "title": "Hello",
            "short_description": null,
            "content": "<p>hi</p>",
            "img_url": null,
            "tag": "SEO",
            "slug": "hello",
            "order": null
        });
        let post: Post = serde_json::from_value(row).unwrap();
        assert_eq!(post.tag.as_deref(), Some("SEO"));
        assert_eq!(post.order, None);
        assert_eq!(post.short_description, None);
    }

    #[test]
    fn test_insert_payload_omits_absent_fields() {
        let post = Post::new("Hello".to_string());
        let value = serde_json::to_value(&post).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("created_at"));
        assert_eq!(object["order"], serde_json::json!(0));
    }
}
