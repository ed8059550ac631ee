//! Sheetsmith rendering
//!
//! Format-handler registry, per-subject worksheet handlers, quiz shaping,
//! and printable document assembly. The registry is constructed once and
//! passed to callers explicitly; everything in this crate is pure
//! string/struct manipulation with no I/O.

pub mod document;
pub mod handlers;
pub mod html;
pub mod quiz;
pub mod registry;

pub use document::render_document;
pub use handlers::{base_transform, FormatHandler};
pub use quiz::{estimated_minutes, shape_quiz};
pub use registry::FormatHandlerRegistry;
