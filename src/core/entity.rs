//! ContentRecord trait - common interface for all content entity types

use serde::{de::DeserializeOwned, Serialize};

/// Common trait for every record type stored in a backend table
pub trait ContentRecord: Serialize + DeserializeOwned {
    /// The backend table this entity lives in (e.g., "posts")
    const TABLE: &'static str;

    /// Singular name for messages (e.g., "post")
    const NAME: &'static str;

    /// Plural name for messages (e.g., "posts")
    const NAME_PLURAL: &'static str;

    /// Whether rows carry `created_at`/`updated_at` columns maintained by
    /// the toolkit on writes
    const HAS_TIMESTAMPS: bool = false;

    /// The record's backend-assigned id, if it has one yet
    fn id(&self) -> Option<&str>;

    /// Human-readable label used in lists and messages
    fn display_title(&self) -> &str;

    /// Visibility flag; entities without an `is_active` column are always
    /// considered active
    fn is_active(&self) -> bool {
        true
    }
}
