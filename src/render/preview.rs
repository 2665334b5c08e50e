//! Post preview generation
//!
//! Renders a single post to a standalone HTML page so an editor can check
//! content offline before it goes live. The template is embedded in the
//! binary; the post body must already be sanitized by the caller.

use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::entities::Post;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const PREVIEW_TEMPLATE: &str = "preview.html.tera";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),
}

/// Renders posts through the embedded preview template
pub struct PreviewRenderer {
    tera: Tera,
}

impl PreviewRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".tera"]);

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| RenderError::Template(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a post to a full HTML page. `sanitized_content` is the post
    /// body after [`crate::html::sanitize_html`].
    pub fn render_post(&self, post: &Post, sanitized_content: &str) -> Result<String, RenderError> {
        let mut context = tera::Context::new();
        context.insert("title", &post.title);
        context.insert("slug", &post.slug);
        context.insert("summary", &post.short_description.clone().unwrap_or_default());
        context.insert("category", &post.tag.clone().unwrap_or_default());
        context.insert("img_url", &post.img_url.clone().unwrap_or_default());
        context.insert("content", sanitized_content);
        context.insert(
            "published",
            &post
                .created_at
                .map(|ts| ts.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        );

        if self.tera.get_template_names().any(|n| n == PREVIEW_TEMPLATE) {
            self.tera
                .render(PREVIEW_TEMPLATE, &context)
                .map_err(|e| RenderError::Template(e.to_string()))
        } else {
            Ok(fallback_preview(post, sanitized_content))
        }
    }
}

/// Bare-bones page used if the embedded template is missing
fn fallback_preview(post: &Post, sanitized_content: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><article><h1>{title}</h1>{content}</article></body></html>",
        title = post.title,
        content = sanitized_content,
    )
}
