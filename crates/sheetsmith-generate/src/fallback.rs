//! Deterministic default payloads.
//!
//! When validation retries are exhausted the pipeline substitutes one of
//! these hand-authored payloads instead of failing the request. They are
//! shaped exactly like a well-formed LLM response for the request's
//! resource type, honor the requested item count, and contain no
//! randomness.

use serde_json::{json, Value};
use sheetsmith_core::{
    is_kindergarten, ResourceGenerationOptions, ResourceType, RubricStyle, Subject,
};

/// Kindergarten reading fallback passage.
const MY_FRIEND_PASSAGE: &str = "I have a friend.\n\
My friend likes to play.\n\
We play in the sun.\n\
My friend makes me smile.";

/// Builds the default payload for a request.
#[must_use]
pub fn default_payload(options: &ResourceGenerationOptions) -> Value {
    match options.resource_type {
        ResourceType::Quiz => default_quiz(options),
        ResourceType::Rubric => default_rubric(options),
        ResourceType::ExitSlip => default_exit_slip(options),
        ResourceType::LessonPlan => default_lesson_plan(options),
        ResourceType::Worksheet => match options.subject {
            Subject::Reading => default_reading(options),
            Subject::Math => default_math(options),
            Subject::Science => default_science(options),
            Subject::General => default_general(options),
        },
    }
}

fn default_reading(options: &ResourceGenerationOptions) -> Value {
    if is_kindergarten(&options.grade_level) {
        let questions = [
            ("Do I have a friend?", "Yes"),
            ("Do we play in the rain?", "No"),
            ("Does my friend make me smile?", "Yes"),
        ];
        let items: Vec<Value> = (0..options.item_count)
            .map(|i| {
                let (question, answer) = questions[i % questions.len()];
                json!({
                    "question": question,
                    "options": ["Yes", "No"],
                    "answer": answer,
                    "explanation": "The passage tells us."
                })
            })
            .collect();
        return json!({
            "title": "My Friend",
            "passage": MY_FRIEND_PASSAGE,
            "questions": items,
            "vocabulary": [
                {"word": "friend", "definition": "someone you like to spend time with"},
                {"word": "smile", "definition": "a happy face"}
            ]
        });
    }

    let items: Vec<Value> = (0..options.item_count)
        .map(|i| {
            json!({
                "question": format!(
                    "Reread paragraph {} and summarize its main idea in your own words.",
                    (i % 2) + 1
                ),
                "answer": "Answers will vary; look for the paragraph's main idea.",
                "explanation": "Summarizing checks understanding of the central point."
            })
        })
        .collect();
    json!({
        "title": "Practice Reading",
        "passage": "Reading a little every day makes you a stronger reader.\n\n\
                    When you find a word you do not know, use the sentences \
                    around it to guess what it means. Then check your guess.",
        "questions": items
    })
}

fn default_math(options: &ResourceGenerationOptions) -> Value {
    let items: Vec<Value> = (1..=options.item_count)
        .map(|i| {
            json!({
                "question": format!("What is {i} + {i}?"),
                "answer": (i + i).to_string(),
                "explanation": format!("Adding a number to itself doubles it: {i} + {i} = {}.", i + i)
            })
        })
        .collect();
    json!({
        "title": "Number Practice",
        "instructions": "Solve each problem. Show your work.",
        "problems": items
    })
}

fn default_science(options: &ResourceGenerationOptions) -> Value {
    let prompts = [
        "Name one living thing you can see outside and one nonliving thing.",
        "What happens to a puddle of water on a sunny day?",
        "Why do plants need sunlight?",
        "Name the three states of matter and give an example of each.",
        "What tool would you use to look at something very small?",
    ];
    let answers = [
        "Living: a tree or bird. Nonliving: a rock or bench.",
        "It evaporates into the air.",
        "They use sunlight to make their own food.",
        "Solid (ice), liquid (water), gas (steam).",
        "A microscope.",
    ];
    let items: Vec<Value> = (0..options.item_count)
        .map(|i| {
            json!({
                "question": prompts[i % prompts.len()],
                "answer": answers[i % answers.len()],
                "explanation": "An everyday observation backs this up."
            })
        })
        .collect();
    json!({
        "title": "Science Review",
        "instructions": "Answer each question in complete sentences.",
        "problems": items
    })
}

fn default_general(options: &ResourceGenerationOptions) -> Value {
    let items: Vec<Value> = (1..=options.item_count)
        .map(|i| {
            json!({
                "question": format!(
                    "Write one thing you remember about {} (item {i}).",
                    options.topic_area
                ),
                "answer": "Answers will vary.",
                "explanation": "Any accurate recollection counts."
            })
        })
        .collect();
    json!({
        "title": format!("{} Review", options.topic_area),
        "instructions": "Answer each item as completely as you can.",
        "problems": items
    })
}

fn default_quiz(options: &ResourceGenerationOptions) -> Value {
    let items: Vec<Value> = (1..=options.item_count)
        .map(|i| {
            if i % 3 == 0 {
                json!({
                    "question": format!("In one sentence, describe something you know about {}.", options.topic_area),
                    "type": "short_answer",
                    "answer": "Answers will vary.",
                    "points": 2
                })
            } else {
                json!({
                    "question": format!("Which statement about {} is true? (item {i})", options.topic_area),
                    "type": "multiple_choice",
                    "options": [
                        "The one your teacher reviewed in class",
                        "A statement that contradicts the lesson",
                        "A statement about a different topic",
                        "None of the above"
                    ],
                    "answer": "The one your teacher reviewed in class",
                    "points": 1
                })
            }
        })
        .collect();
    json!({
        "title": format!("{} Quiz", options.topic_area),
        "questions": items
    })
}

fn default_rubric(options: &ResourceGenerationOptions) -> Value {
    let names = [
        "Understanding",
        "Accuracy",
        "Effort and Completeness",
        "Communication",
    ];
    let levels = match options.rubric_style {
        RubricStyle::Numeric => json!([
            {"score": "4", "description": "Exceeds expectations with no gaps."},
            {"score": "3", "description": "Meets expectations with minor gaps."},
            {"score": "2", "description": "Partially meets expectations."},
            {"score": "1", "description": "Does not yet meet expectations."}
        ]),
        RubricStyle::Checklist => json!([
            {"score": "\u{2713}", "description": "Expectation was met."},
            {"score": "\u{d7}", "description": "Expectation was not met."}
        ]),
    };
    let criteria: Vec<Value> = (0..options.item_count)
        .map(|i| {
            json!({
                "name": names[i % names.len()],
                "description": format!("How the work demonstrates {}.", names[i % names.len()].to_lowercase()),
                "levels": levels
            })
        })
        .collect();
    json!({
        "title": format!("{} Rubric", options.topic_area),
        "criteria": criteria
    })
}

fn default_exit_slip(options: &ResourceGenerationOptions) -> Value {
    let prompts = [
        json!({
            "prompt": "What is one thing you learned today?",
            "kind": "short_answer"
        }),
        json!({
            "prompt": "What is one question you still have?",
            "kind": "short_answer"
        }),
        json!({
            "prompt": "How confident do you feel about today's topic?",
            "kind": "multiple_choice",
            "options": ["Very confident", "Somewhat confident", "Not yet confident"]
        }),
    ];
    let questions: Vec<Value> = (0..options.item_count)
        .map(|i| prompts[i % prompts.len()].clone())
        .collect();
    json!({
        "title": "Exit Slip",
        "questions": questions
    })
}

fn default_lesson_plan(options: &ResourceGenerationOptions) -> Value {
    json!({
        "title": format!("Introduction to {}", options.topic_area),
        "objectives": [
            format!("Describe the key ideas of {}.", options.topic_area),
            "Practice the skill with guided examples.",
        ],
        "materials": ["Whiteboard", "Student notebooks", "Practice handout"],
        "activities": [
            {"name": "Warm-up", "durationMinutes": 5,
             "description": "Quick review question connecting to prior learning."},
            {"name": "Mini-lesson", "durationMinutes": 15,
             "description": format!("Introduce {} with worked examples.", options.topic_area)},
            {"name": "Guided practice", "durationMinutes": 15,
             "description": "Students work in pairs while the teacher circulates."},
            {"name": "Closing discussion", "durationMinutes": 10,
             "description": "Share answers and address misconceptions."}
        ],
        "assessment": "Collect the practice handout and review the closing discussion responses."
    })
}
