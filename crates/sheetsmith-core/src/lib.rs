//! Sheetsmith core types
//!
//! Options, grade banding, the difficulty/parameter calculator, canonical
//! resource shapes, the rendering envelope, and the shared error taxonomy.

pub mod difficulty;
pub mod envelope;
pub mod error;
pub mod grade;
pub mod options;
pub mod resource;

pub use difficulty::{
    AdvancedParameters, CognitiveWeights, DifficultyParameters, QuestionKind,
};
pub use envelope::{
    default_decorations, GeneratedResource, ResourceMetadata, Section, SectionKind,
    SectionPayload,
};
pub use error::{LlmErrorKind, Result, SheetsmithError};
pub use grade::{is_kindergarten, parse_grade, GradeBand, KINDERGARTEN, MAX_GRADE};
pub use options::{
    Difficulty, Format, ResourceGenerationOptions, ResourceType, RubricStyle, Subject,
};
pub use resource::{
    ExitSlipQuestion, ExitSlipResource, GenerationResult, LessonActivity, LessonPlanResource,
    Problem, QuizQuestion, QuizQuestionKind, QuizResource, RawItem, Resource, RubricCriterion,
    RubricLevel, RubricResource, VocabularyTerm, WorksheetResource,
};
