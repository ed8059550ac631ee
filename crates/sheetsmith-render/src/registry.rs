//! Format-handler registry.
//!
//! The registry owns one handler per registered (subject, format) pair and
//! is built once at startup and passed to the generator explicitly; there
//! is no global instance. Lookups for unregistered pairs fail with an
//! error naming both halves of the pair.

use std::collections::HashMap;

use serde_json::Value;
use sheetsmith_core::{
    Format, Result, ResourceGenerationOptions, SheetsmithError, Subject, WorksheetResource,
};
use tracing::debug;

use crate::handlers::{
    math::{GuidedMathHandler, StandardMathHandler},
    reading::{ComprehensionHandler, GuidedReadingHandler},
    science::{ExperimentHandler, StandardScienceHandler},
    FormatHandler,
};

/// Dispatch table from (subject, format) to the handler that owns the
/// transform/preview/print operations for that pair.
pub struct FormatHandlerRegistry {
    handlers: HashMap<(Subject, Format), Box<dyn FormatHandler>>,
}

impl FormatHandlerRegistry {
    /// Builds the registry with the full set of supported pairs.
    ///
    /// The set is closed: math gets standard and guided, reading gets
    /// comprehension and guided reading, science gets standard and
    /// experiment. The general subject is handled outside the registry.
    #[must_use]
    pub fn new() -> Self {
        let mut handlers: HashMap<(Subject, Format), Box<dyn FormatHandler>> = HashMap::new();
        handlers.insert(
            (Subject::Math, Format::Standard),
            Box::new(StandardMathHandler),
        );
        handlers.insert((Subject::Math, Format::Guided), Box::new(GuidedMathHandler));
        handlers.insert(
            (Subject::Reading, Format::Comprehension),
            Box::new(ComprehensionHandler),
        );
        handlers.insert(
            (Subject::Reading, Format::GuidedReading),
            Box::new(GuidedReadingHandler),
        );
        handlers.insert(
            (Subject::Science, Format::Standard),
            Box::new(StandardScienceHandler),
        );
        handlers.insert(
            (Subject::Science, Format::Experiment),
            Box::new(ExperimentHandler),
        );
        Self { handlers }
    }

    /// Looks up the handler for a pair.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsmithError::NoHandler`] naming the subject and format
    /// when the pair is not registered.
    pub fn handler(&self, subject: Subject, format: Format) -> Result<&dyn FormatHandler> {
        self.handlers
            .get(&(subject, format))
            .map(AsRef::as_ref)
            .ok_or_else(|| SheetsmithError::no_handler(subject.to_string(), format.to_string()))
    }

    /// Transforms a raw LLM payload through the handler for the request's
    /// subject and effective format.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsmithError::NoHandler`] for unregistered pairs, or a
    /// [`SheetsmithError::Transform`] wrapping the handler failure.
    pub fn transform_resource(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        let format = options.effective_format();
        debug!(subject = %options.subject, %format, "transforming resource");
        let handler = self.handler(options.subject, format)?;
        handler
            .transform(raw, options)
            .map_err(|e| SheetsmithError::transform(e.to_string()))
    }

    /// Renders a transformed worksheet as an on-screen preview fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsmithError::NoHandler`] when the resource carries an
    /// unregistered subject/format pair.
    pub fn generate_preview(&self, resource: &WorksheetResource) -> Result<String> {
        let handler = self.handler(resource.subject, resource.format)?;
        Ok(handler.preview(resource))
    }

    /// Renders a transformed worksheet as a printable fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsmithError::NoHandler`] when the resource carries an
    /// unregistered subject/format pair.
    pub fn generate_pdf(&self, resource: &WorksheetResource) -> Result<String> {
        let handler = self.handler(resource.subject, resource.format)?;
        Ok(handler.generate_pdf(resource))
    }
}

impl Default for FormatHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
