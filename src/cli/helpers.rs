//! Shared helper functions for CLI commands

/// Format a backend id for display, truncating if too long
///
/// UUIDs are 36 characters; table columns show the first 8, which is
/// plenty to disambiguate and to paste as an id-prefix query.
pub fn format_short_id_str(id: &str) -> String {
    if id.len() > 8 {
        format!("{}…", &id[..8])
    } else {
        id.to_string()
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_short_id_str() {
        assert_eq!(format_short_id_str("abc"), "abc");
        assert_eq!(
            format_short_id_str("3c9f4d0e-8a52-4c7a-9a8e-2f1f2a9b6c01"),
            "3c9f4d0e…"
        );
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }
}
