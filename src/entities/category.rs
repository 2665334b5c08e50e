//! Blog category entity

use serde::{Deserialize, Serialize};

use crate::core::entity::ContentRecord;

/// A blog category. Categories are listed alphabetically and carry no
/// order column; posts reference them by name through their `tag` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,
}

impl ContentRecord for Category {
    const TABLE: &'static str = "blog_categories";
    const NAME: &'static str = "category";
    const NAME_PLURAL: &'static str = "categories";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_title(&self) -> &str {
        &self.name
    }
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { id: None, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_minimal_row() {
        let row = serde_json::json!({ "id": "x", "name": "SEO" });
        let category: Category = serde_json::from_value(row).unwrap();
        assert_eq!(category.name, "SEO");
    }
}
