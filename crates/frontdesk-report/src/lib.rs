//! Visit-report PDF generator.
//!
//! A pure function from check-in data, the current document list, and
//! optional company branding to PDF bytes. The render clock is injected, so
//! output is deterministic for identical inputs.

pub mod error;
mod render;

pub use error::{Error, Result};
pub use render::render;
