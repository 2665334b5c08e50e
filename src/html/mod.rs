//! HTML handling for post content

pub mod sanitize;

pub use sanitize::sanitize_html;
