//! Slug derivation for posts
//!
//! Slugs are derived from titles and used as the public address of a post,
//! so the rules here must stay stable: changing them would break existing
//! URLs stored in the backend.

/// Derive a URL slug from a post title.
///
/// Lowercases, turns whitespace runs into single dashes, strips everything
/// outside `[a-z0-9_-]`, collapses dash runs, and trims leading/trailing
/// dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for ch in title.to_lowercase().chars() {
        if ch.is_whitespace() {
            slug.push('-');
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            slug.push(ch);
        }
        // anything else (punctuation, non-ASCII) is dropped
    }

    let mut collapsed = String::with_capacity(slug.len());
    let mut last_was_dash = false;
    for ch in slug.chars() {
        if ch == '-' {
            if !last_was_dash {
                collapsed.push('-');
            }
            last_was_dash = true;
        } else {
            collapsed.push(ch);
            last_was_dash = false;
        }
    }

    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("SEO Strategy 2025"), "seo-strategy-2025");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("A/B testing: the basics!"), "ab-testing-the-basics");
    }

    #[test]
    fn test_slugify_collapses_dashes_and_whitespace() {
        assert_eq!(slugify("one   two"), "one-two");
        assert_eq!(slugify("pre--existing---dashes"), "pre-existing-dashes");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("café crème"), "caf-crme");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case title"), "snake_case-title");
    }
}
