use bon::Builder;
use serde::{Deserialize, Serialize};

/// Structured feedback returned by the evaluator for one student answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct EvaluationResult {
    /// Points awarded.
    pub score:            u32,
    /// Rubric ceiling.
    pub max_score:        u32,
    /// Short justification for the score.
    pub reasoning:        String,
    /// Constructive commentary for the student.
    pub feedback:         String,
    /// Rubric points absent from the answer, in the order reported.
    #[builder(default)]
    pub missing_points:   Vec<String>,
    /// Incorrect statements found in the answer, in the order reported.
    #[builder(default)]
    pub factual_errors:   Vec<String>,
    /// A corrected version of the student's answer.
    pub corrected_answer: String,
}

impl EvaluationResult {
    /// Whether the evaluator found nothing missing and nothing wrong.
    pub fn is_flawless(&self) -> bool {
        self.missing_points.is_empty() && self.factual_errors.is_empty()
    }

    /// Whether the score lies within `0..=max_score`.
    pub fn score_in_bounds(&self) -> bool {
        self.score <= self.max_score
    }
}

/// Body of a JSON evaluation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// The answer key or marking criteria.
    #[serde(default)]
    pub answer_key:     String,
    /// The student's answer.
    #[serde(default)]
    pub student_answer: String,
}
