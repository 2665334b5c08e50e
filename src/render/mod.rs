//! HTML rendering for previews

pub mod preview;

pub use preview::{PreviewRenderer, RenderError};
