//! Greeting card templates and README rendering for pokegreet.
//!
//! Rendering is pure: the same [`Record`](pg_core::Record), [`Template`] and
//! timestamp always produce byte-identical output. All randomness lives in
//! [`Template::random`], which callers invoke before rendering.

/// The greeting card layout.
pub mod card;
/// Error types for rendering.
pub mod error;
/// Ordered first-match fallback helpers.
pub mod fallback;
/// Base stat bars.
pub mod stats;
/// Greeting and closing line templates.
pub mod templates;

/// Re-export the renderer entry point.
pub use card::render_card;
/// Re-export error types.
pub use error::{RenderError, RenderResult};
/// Re-export the fallback helper.
pub use fallback::first_available;
/// Re-export template types.
pub use templates::Template;
