//! Pedagogical difficulty parameters.
//!
//! Pure, deterministic mapping from (grade, subject, difficulty) to the
//! tuning values embedded in LLM prompts: a cognitive-level distribution,
//! language-complexity and visual-support scores, and an applicable
//! question-type list. Band defaults come first, then subject and
//! difficulty adjustments, then the Kindergarten and grade-12 overrides.

use serde::{Deserialize, Serialize};

use crate::grade::{parse_grade, GradeBand, KINDERGARTEN, MAX_GRADE};
use crate::options::{Difficulty, Subject};

/// Weight distribution across Bloom-style cognitive levels.
///
/// Each weight is in `[0, 1]`; the base table for every band sums to
/// exactly 1.0, and adjustments only move weight between levels, so the
/// sum never exceeds 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveWeights {
    /// Remembering facts and terms.
    pub recall: f64,
    /// Explaining ideas and concepts.
    pub understand: f64,
    /// Using information in new situations.
    pub apply: f64,
    /// Drawing connections among ideas.
    pub analyze: f64,
    /// Justifying a position or decision.
    pub evaluate: f64,
    /// Producing new or original work.
    pub create: f64,
}

impl CognitiveWeights {
    /// Sum of all six weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.recall + self.understand + self.apply + self.analyze + self.evaluate + self.create
    }

    /// Moves up to `amount` of weight from `self.analyze`/`evaluate`/`create`
    /// toward `recall`/`understand`, preserving the total.
    fn ease(&mut self, amount: f64) {
        let moved = shift(&mut self.analyze, &mut self.recall, amount / 2.0)
            + shift(&mut self.evaluate, &mut self.understand, amount / 2.0);
        // Any shortfall comes out of apply.
        let shortfall = amount - moved;
        if shortfall > 0.0 {
            shift(&mut self.apply, &mut self.recall, shortfall);
        }
    }

    /// Moves up to `amount` of weight from `recall`/`understand` toward
    /// `analyze`/`evaluate`, preserving the total.
    fn harden(&mut self, amount: f64) {
        let moved = shift(&mut self.recall, &mut self.analyze, amount / 2.0)
            + shift(&mut self.understand, &mut self.evaluate, amount / 2.0);
        let shortfall = amount - moved;
        if shortfall > 0.0 {
            shift(&mut self.apply, &mut self.analyze, shortfall);
        }
    }
}

/// Moves up to `amount` from `from` to `to`, returning the amount moved.
fn shift(from: &mut f64, to: &mut f64, amount: f64) -> f64 {
    let moved = amount.min(*from).max(0.0);
    *from -= moved;
    *to += moved;
    moved
}

/// Question shapes appropriate for a band/subject combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one answer from listed options.
    MultipleChoice,
    /// Free-text answer of a sentence or two.
    ShortAnswer,
    /// Multi-sentence narrative problem.
    WordProblem,
    /// Complete the missing word or number.
    FillInBlank,
    /// Match items across two columns.
    Matching,
    /// Match a picture to a word or concept (Kindergarten).
    PictureMatching,
    /// Sort items into labeled groups (Kindergarten).
    Sorting,
    /// Count objects in a picture (Kindergarten).
    Counting,
    /// Structured multi-paragraph response.
    Essay,
    /// Extended research or investigation task (grade 12).
    ResearchProject,
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::MultipleChoice => "multiple choice",
            Self::ShortAnswer => "short answer",
            Self::WordProblem => "word problem",
            Self::FillInBlank => "fill in the blank",
            Self::Matching => "matching",
            Self::PictureMatching => "picture matching",
            Self::Sorting => "sorting",
            Self::Counting => "counting",
            Self::Essay => "essay",
            Self::ResearchProject => "research project",
        };
        write!(f, "{s}")
    }
}

/// Extra tuning for grade-12 content.
///
/// Grade 12 requests carry research- and theory-oriented fields on top of
/// the high-school band parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedParameters {
    /// How much independent research the content should demand (1-10).
    pub research_skills: u8,
    /// How much theoretical framing to include (1-10).
    pub theoretical_depth: u8,
    /// Additional question shapes unlocked at this level.
    pub question_types: Vec<QuestionKind>,
}

/// The full set of pedagogical tuning values for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyParameters {
    /// The grade band the request was bucketed into.
    pub band: GradeBand,
    /// Cognitive-level distribution.
    pub weights: CognitiveWeights,
    /// Vocabulary and sentence complexity (1-10).
    pub language_complexity: u8,
    /// How much visual scaffolding to request (1-10).
    pub visual_support: u8,
    /// Conceptual depth (1-10).
    pub concept_depth: u8,
    /// How many steps a single item may require (1-10).
    pub multi_step_complexity: u8,
    /// Question shapes appropriate for this request.
    pub question_types: Vec<QuestionKind>,
    /// Present only for grade-12 requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedParameters>,
}

/// Amount of cognitive weight moved by one difficulty step.
const DIFFICULTY_WEIGHT_SHIFT: f64 = 0.1;

impl DifficultyParameters {
    /// Computes parameters for a (grade, subject, difficulty) triple.
    ///
    /// Deterministic and side-effect free: identical inputs always produce
    /// identical outputs.
    #[must_use]
    pub fn calculate(grade: &str, subject: Subject, difficulty: Difficulty) -> Self {
        let band = GradeBand::parse(grade);
        let mut params = Self::band_defaults(band);

        // Subject adjustments before difficulty scaling.
        match subject {
            Subject::Math => {
                params.multi_step_complexity = clamp_score(params.multi_step_complexity, 1);
            }
            Subject::Science => {
                params.concept_depth = clamp_score(params.concept_depth, 1);
            }
            Subject::Reading => {
                params.language_complexity = clamp_score(params.language_complexity, 1);
            }
            Subject::General => {}
        }

        match difficulty {
            Difficulty::Easy => {
                params.weights.ease(DIFFICULTY_WEIGHT_SHIFT);
                params.language_complexity = clamp_score(params.language_complexity, -1);
                params.concept_depth = clamp_score(params.concept_depth, -1);
                params.multi_step_complexity = clamp_score(params.multi_step_complexity, -1);
                params.visual_support = clamp_score(params.visual_support, 1);
            }
            Difficulty::Medium => {}
            Difficulty::Hard => {
                params.weights.harden(DIFFICULTY_WEIGHT_SHIFT);
                params.language_complexity = clamp_score(params.language_complexity, 1);
                params.concept_depth = clamp_score(params.concept_depth, 1);
                params.multi_step_complexity = clamp_score(params.multi_step_complexity, 1);
                params.visual_support = clamp_score(params.visual_support, -1);
            }
        }

        // Edge-case overrides on top of the band logic.
        match parse_grade(grade) {
            Some(KINDERGARTEN) => {
                params.visual_support = 10;
                params.language_complexity = 1;
                params.concept_depth = 1;
                params.multi_step_complexity = 1;
                params.weights = CognitiveWeights {
                    recall: 0.6,
                    understand: 0.4,
                    apply: 0.0,
                    analyze: 0.0,
                    evaluate: 0.0,
                    create: 0.0,
                };
                params.question_types = vec![
                    QuestionKind::PictureMatching,
                    QuestionKind::Sorting,
                    QuestionKind::Counting,
                ];
            }
            Some(MAX_GRADE) => {
                params.advanced = Some(AdvancedParameters {
                    research_skills: 9,
                    theoretical_depth: 9,
                    question_types: vec![QuestionKind::Essay, QuestionKind::ResearchProject],
                });
            }
            _ => {}
        }

        params
    }

    /// Base table for a band before any adjustments.
    fn band_defaults(band: GradeBand) -> Self {
        match band {
            GradeBand::EarlyElementary => Self {
                band,
                weights: CognitiveWeights {
                    recall: 0.4,
                    understand: 0.3,
                    apply: 0.2,
                    analyze: 0.1,
                    evaluate: 0.0,
                    create: 0.0,
                },
                language_complexity: 2,
                visual_support: 9,
                concept_depth: 2,
                multi_step_complexity: 1,
                question_types: vec![
                    QuestionKind::MultipleChoice,
                    QuestionKind::Matching,
                    QuestionKind::FillInBlank,
                ],
                advanced: None,
            },
            GradeBand::UpperElementary => Self {
                band,
                weights: CognitiveWeights {
                    recall: 0.3,
                    understand: 0.25,
                    apply: 0.25,
                    analyze: 0.15,
                    evaluate: 0.05,
                    create: 0.0,
                },
                language_complexity: 4,
                visual_support: 6,
                concept_depth: 4,
                multi_step_complexity: 3,
                question_types: vec![
                    QuestionKind::MultipleChoice,
                    QuestionKind::ShortAnswer,
                    QuestionKind::WordProblem,
                    QuestionKind::FillInBlank,
                ],
                advanced: None,
            },
            GradeBand::MiddleSchool => Self {
                band,
                weights: CognitiveWeights {
                    recall: 0.2,
                    understand: 0.2,
                    apply: 0.25,
                    analyze: 0.2,
                    evaluate: 0.1,
                    create: 0.05,
                },
                language_complexity: 6,
                visual_support: 4,
                concept_depth: 6,
                multi_step_complexity: 5,
                question_types: vec![
                    QuestionKind::MultipleChoice,
                    QuestionKind::ShortAnswer,
                    QuestionKind::WordProblem,
                ],
                advanced: None,
            },
            GradeBand::HighSchool => Self {
                band,
                weights: CognitiveWeights {
                    recall: 0.1,
                    understand: 0.15,
                    apply: 0.25,
                    analyze: 0.25,
                    evaluate: 0.15,
                    create: 0.1,
                },
                language_complexity: 8,
                visual_support: 2,
                concept_depth: 8,
                multi_step_complexity: 7,
                question_types: vec![
                    QuestionKind::MultipleChoice,
                    QuestionKind::ShortAnswer,
                    QuestionKind::Essay,
                ],
                advanced: None,
            },
        }
    }

    /// Prompt-ready guidance text describing these parameters.
    #[must_use]
    pub fn guidance_text(&self) -> String {
        let w = &self.weights;
        let types = self
            .question_types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut text = format!(
            "Target audience: {}.\n\
             Cognitive distribution: {:.0}% recall, {:.0}% understand, {:.0}% apply, \
             {:.0}% analyze, {:.0}% evaluate, {:.0}% create.\n\
             Language complexity: {}/10. Visual support: {}/10. \
             Concept depth: {}/10. Multi-step complexity: {}/10.\n\
             Use these question types: {types}.",
            self.band.label(),
            w.recall * 100.0,
            w.understand * 100.0,
            w.apply * 100.0,
            w.analyze * 100.0,
            w.evaluate * 100.0,
            w.create * 100.0,
            self.language_complexity,
            self.visual_support,
            self.concept_depth,
            self.multi_step_complexity,
        );

        if let Some(advanced) = &self.advanced {
            let advanced_types = advanced
                .question_types
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!(
                "\nInclude research-oriented work (research skills {}/10, \
                 theoretical depth {}/10); also appropriate: {advanced_types}.",
                advanced.research_skills, advanced.theoretical_depth,
            ));
        }

        text
    }
}

/// Applies a delta to a 1-10 score, clamping to the valid range.
fn clamp_score(score: u8, delta: i16) -> u8 {
    let adjusted = i16::from(score) + delta;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        adjusted.clamp(1, 10) as u8
    }
}
