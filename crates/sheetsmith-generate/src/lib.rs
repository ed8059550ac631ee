//! Sheetsmith generation pipeline
//!
//! The LLM completion backend and its HTTP implementation, bounded retry
//! with fallback, payload validation, and the resource normalizer that
//! produces the wire envelope.

pub mod client;
pub mod fallback;
pub mod normalizer;
pub mod retry;
pub mod validate;

pub use client::{CompletionBackend, CompletionRequest, HttpCompletionBackend, SubjectBudget};
pub use fallback::default_payload;
pub use normalizer::{build_envelope, shape_resource, GeneratedOutput, ResourceGenerator};
pub use retry::{GenerationClient, GenerationOutcome};
pub use validate::validate_payload;
