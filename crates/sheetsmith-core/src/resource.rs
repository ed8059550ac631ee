//! Canonical resource types.
//!
//! [`GenerationResult`] is the typed parse of a raw LLM payload (tolerant
//! of the legacy `problems`/`questions`/`experiments` key variants). The
//! `Resource` union is the canonical, subject-and-format-tagged shape that
//! downstream rendering consumes uniformly. Resources are produced
//! exclusively by a format handler's `transform` (or the quiz/rubric
//! shaping routines) and never mutated after creation.

use serde::{Deserialize, Serialize};

use crate::options::{Format, ResourceType, RubricStyle, Subject};

// ============================================================================
// LLM-shaped results
// ============================================================================

/// One vocabulary entry in a reading result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyTerm {
    /// The word being taught.
    #[serde(alias = "term")]
    pub word: String,
    /// A grade-appropriate definition.
    #[serde(default)]
    pub definition: String,
}

/// One item as the LLM shaped it, before transformation.
///
/// Every field except the question text is optional; handlers are
/// responsible for defaulting anything absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    /// The question or problem text.
    #[serde(alias = "prompt", alias = "problem")]
    pub question: String,
    /// The expected answer, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Why the answer is correct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Answer options for multiple-choice items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Worked solution steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    /// Hints for guided formats.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    /// Description of a visual aid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<String>,
    /// Item type label as stated by the LLM ("multiple_choice", ...).
    #[serde(
        default,
        rename = "type",
        alias = "questionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

/// Typed parse of one worksheet-shaped LLM response.
///
/// May be replaced wholesale by a hand-authored default payload if
/// parsing/validation fails after bounded retries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Resource title.
    #[serde(default)]
    pub title: String,
    /// Instructions shown above the items.
    #[serde(default, alias = "introduction", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Reading passage, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    /// The items, whichever legacy key the LLM used.
    #[serde(default, alias = "questions", alias = "experiments")]
    pub problems: Vec<RawItem>,
    /// Vocabulary/key terms, when present.
    #[serde(default, alias = "keyTerms", alias = "key_terms")]
    pub vocabulary: Vec<VocabularyTerm>,
}

// ============================================================================
// Worksheet
// ============================================================================

/// One fully-defaulted worksheet problem.
///
/// All fields are concrete; `transform` fills in anything the LLM omitted
/// so rendering never encounters missing required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// The question text.
    pub question: String,
    /// The expected answer (possibly a defaulted placeholder).
    pub answer: String,
    /// Why the answer is correct.
    pub explanation: String,
    /// Answer options for multiple-choice items (empty otherwise).
    #[serde(default)]
    pub options: Vec<String>,
    /// Worked solution steps (empty unless the format is guided).
    #[serde(default)]
    pub steps: Vec<String>,
    /// Hints (empty unless the format is guided).
    #[serde(default)]
    pub hints: Vec<String>,
    /// Description of a visual aid, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<String>,
}

/// Canonical worksheet shape consumed by preview and print rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetResource {
    /// Always `ResourceType::Worksheet`.
    pub resource_type: ResourceType,
    /// Worksheet title.
    pub title: String,
    /// The subject this worksheet belongs to.
    pub subject: Subject,
    /// The grade string as the user supplied it.
    pub grade_level: String,
    /// The layout variant that determines the rendering handler.
    pub format: Format,
    /// Instructions shown above the problems.
    pub instructions: String,
    /// The problems, fully defaulted.
    pub problems: Vec<Problem>,
    /// Reading passage, when the subject provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    /// Vocabulary terms, when the subject provides them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vocabulary: Vec<VocabularyTerm>,
}

// ============================================================================
// Quiz
// ============================================================================

/// The two item shapes a quiz normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizQuestionKind {
    /// Pick one of the listed options.
    MultipleChoice,
    /// Free-text answer.
    ShortAnswer,
}

/// One normalized quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// The question text.
    pub question: String,
    /// Which item shape this is.
    pub kind: QuizQuestionKind,
    /// Options for multiple-choice questions (empty for short answer).
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct answer.
    pub answer: String,
    /// Explanation, defaulted from the answer when absent.
    pub explanation: String,
    /// Points awarded, defaulted to 1.
    pub points: u32,
}

/// Canonical quiz shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResource {
    /// Always `ResourceType::Quiz`.
    pub resource_type: ResourceType,
    /// Quiz title.
    pub title: String,
    /// The subject this quiz covers.
    pub subject: Subject,
    /// The grade string as the user supplied it.
    pub grade_level: String,
    /// The normalized questions.
    pub questions: Vec<QuizQuestion>,
    /// Estimated completion time, derived from the question count.
    pub estimated_time_minutes: u32,
}

// ============================================================================
// Rubric
// ============================================================================

/// One performance level within a rubric criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricLevel {
    /// The score label: "1".."4" for numeric rubrics, "\u{2713}"/"\u{d7}"
    /// for checklists.
    pub score: String,
    /// What performance at this level looks like.
    pub description: String,
}

/// One criterion being assessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricCriterion {
    /// Criterion name.
    pub name: String,
    /// What this criterion measures.
    #[serde(default)]
    pub description: String,
    /// Ordered performance levels.
    pub levels: Vec<RubricLevel>,
}

/// Canonical rubric shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricResource {
    /// Always `ResourceType::Rubric`.
    pub resource_type: ResourceType,
    /// Rubric title.
    pub title: String,
    /// The subject being assessed.
    pub subject: Subject,
    /// The grade string as the user supplied it.
    pub grade_level: String,
    /// Scoring style the levels conform to.
    pub style: RubricStyle,
    /// The criteria with their levels.
    pub criteria: Vec<RubricCriterion>,
}

// ============================================================================
// Exit slip
// ============================================================================

/// One exit-slip question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSlipQuestion {
    /// The question text.
    pub prompt: String,
    /// Item type label ("multiple_choice", "short_answer", "rating").
    pub kind: String,
    /// Options for multiple-choice prompts.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Canonical exit-slip shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitSlipResource {
    /// Always `ResourceType::ExitSlip`.
    pub resource_type: ResourceType,
    /// Exit-slip title.
    pub title: String,
    /// The subject the lesson covered.
    pub subject: Subject,
    /// The grade string as the user supplied it.
    pub grade_level: String,
    /// The questions, in order.
    pub questions: Vec<ExitSlipQuestion>,
}

// ============================================================================
// Lesson plan
// ============================================================================

/// One activity within a lesson plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonActivity {
    /// Activity name.
    pub name: String,
    /// Planned duration.
    pub duration_minutes: u32,
    /// What happens during the activity.
    pub description: String,
}

/// Canonical lesson-plan shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlanResource {
    /// Always `ResourceType::LessonPlan`.
    pub resource_type: ResourceType,
    /// Lesson title.
    pub title: String,
    /// The subject being taught.
    pub subject: Subject,
    /// The grade string as the user supplied it.
    pub grade_level: String,
    /// Learning objectives.
    pub objectives: Vec<String>,
    /// Required materials.
    pub materials: Vec<String>,
    /// Ordered activities.
    pub activities: Vec<LessonActivity>,
    /// How learning is assessed.
    pub assessment: String,
}

// ============================================================================
// Resource union
// ============================================================================

/// The canonical output of content generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    /// A student-facing worksheet.
    Worksheet(WorksheetResource),
    /// A scored quiz.
    Quiz(QuizResource),
    /// A grading rubric.
    Rubric(RubricResource),
    /// An end-of-lesson check.
    ExitSlip(ExitSlipResource),
    /// A lesson plan.
    LessonPlan(LessonPlanResource),
}

impl Resource {
    /// The title common to every variant.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Worksheet(r) => &r.title,
            Self::Quiz(r) => &r.title,
            Self::Rubric(r) => &r.title,
            Self::ExitSlip(r) => &r.title,
            Self::LessonPlan(r) => &r.title,
        }
    }

    /// The resource-type discriminant common to every variant.
    #[must_use]
    pub const fn resource_type(&self) -> ResourceType {
        match self {
            Self::Worksheet(_) => ResourceType::Worksheet,
            Self::Quiz(_) => ResourceType::Quiz,
            Self::Rubric(_) => ResourceType::Rubric,
            Self::ExitSlip(_) => ResourceType::ExitSlip,
            Self::LessonPlan(_) => ResourceType::LessonPlan,
        }
    }
}
