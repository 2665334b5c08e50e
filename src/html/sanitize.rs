//! Post content sanitization
//!
//! Post bodies are HTML produced by the site's rich-text editor and must
//! be cleaned before they are rendered anywhere. This wraps ammonia with
//! the site's policy: a fixed tag/attribute allowlist, no `data-*`
//! attributes, and inline `style` values filtered down to a short list of
//! formatting properties the editor actually emits.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// CSS properties allowed to survive in `style` attributes
const ALLOWED_CSS_PROPS: &[&str] = &[
    "text-align",
    "font-size",
    "font-weight",
    "font-style",
    "text-decoration",
    "color",
    "background-color",
];

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "u", "s", "blockquote", "ul", "ol", "li", "a", "img", "table",
    "thead", "tbody", "tr", "th", "td", "h1", "h2", "h3", "h4", "h5", "h6", "code", "pre", "hr",
    "span", "div",
];

/// Sanitize rich-text HTML with the site policy.
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = ALLOWED_TAGS.iter().copied().collect();
    let generic_attributes: HashSet<&str> = ["class", "style", "title"].into_iter().collect();

    let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    tag_attributes.insert("a", ["href", "target", "rel"].into_iter().collect());
    tag_attributes.insert(
        "img",
        ["src", "alt", "width", "height"].into_iter().collect(),
    );
    tag_attributes.insert("th", ["colspan", "rowspan"].into_iter().collect());
    tag_attributes.insert("td", ["colspan", "rowspan"].into_iter().collect());

    Builder::default()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        // rel is allowlisted per-tag above, so ammonia must not manage it
        .link_rel(None)
        .attribute_filter(|_element, attribute, value| {
            if attribute == "style" {
                filter_style_value(value).map(Cow::Owned)
            } else {
                Some(Cow::Borrowed(value))
            }
        })
        .clean(html)
        .to_string()
}

/// Drop every CSS declaration whose property is not allowlisted.
///
/// Returns `None` when nothing survives, which removes the attribute
/// entirely.
fn filter_style_value(value: &str) -> Option<String> {
    let kept: Vec<String> = value
        .split(';')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .filter(|rule| {
            let prop = rule
                .split(':')
                .next()
                .map(|p| p.trim().to_lowercase())
                .unwrap_or_default();
            ALLOWED_CSS_PROPS.contains(&prop.as_str())
        })
        .map(str::to_string)
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_are_stripped() {
        let out = sanitize_html("<p>hi</p><script>alert(1)</script>");
        assert!(out.contains("<p>hi</p>"));
        assert!(!out.contains("script"));
        assert!(!out.contains("alert"));
    }

    #[test]
    fn test_event_handlers_are_stripped() {
        let out = sanitize_html(r#"<p onclick="steal()">x</p>"#);
        assert!(!out.contains("onclick"));
        assert!(out.contains("<p>x</p>"));
    }

    #[test]
    fn test_data_attributes_are_dropped() {
        let out = sanitize_html(r#"<div data-track="42">x</div>"#);
        assert!(!out.contains("data-track"));
    }

    #[test]
    fn test_links_keep_href_target_rel() {
        let out = sanitize_html(r#"<a href="https://x.example" target="_blank" rel="noopener">x</a>"#);
        assert!(out.contains(r#"href="https://x.example""#));
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"rel="noopener""#));
    }

    #[test]
    fn test_style_is_filtered_to_allowlist() {
        let out = sanitize_html(r#"<span style="color: red; position: absolute">x</span>"#);
        assert!(out.contains("color: red"));
        assert!(!out.contains("position"));
    }

    #[test]
    fn test_style_with_nothing_allowed_is_removed() {
        let out = sanitize_html(r#"<span style="position: absolute; z-index: 9">x</span>"#);
        assert!(!out.contains("style"));
        assert!(out.contains("x"));
    }

    #[test]
    fn test_filter_style_value() {
        assert_eq!(
            filter_style_value("text-align: center; float: left").as_deref(),
            Some("text-align: center")
        );
        assert_eq!(filter_style_value("float: left"), None);
        assert_eq!(filter_style_value("  "), None);
    }

    #[test]
    fn test_tables_and_headings_survive() {
        let html = "<h2>t</h2><table><tbody><tr><td colspan=\"2\">c</td></tr></tbody></table>";
        let out = sanitize_html(html);
        assert!(out.contains("<h2>t</h2>"));
        assert!(out.contains("colspan"));
    }
}
