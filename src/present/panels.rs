#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::score::ScoreGauge;
use crate::types::EvaluationResult;

/// One titled block of the feedback column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// The constructive feedback paragraph.
    Feedback(String),
    /// Rubric points the answer left out.
    MissingPoints(Vec<String>),
    /// Incorrect statements in the answer.
    FactualErrors(Vec<String>),
    /// Shown instead of both lists when neither has entries.
    NoIssues,
    /// The corrected answer.
    CorrectedAnswer(String),
}

impl Panel {
    /// Heading of the panel.
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Feedback(_) => "Constructive Feedback",
            Panel::MissingPoints(_) => "Missing Key Points",
            Panel::FactualErrors(_) => "Factual Errors",
            Panel::NoIssues => "Excellent Work!",
            Panel::CorrectedAnswer(_) => "Corrected Answer",
        }
    }

    /// Stable identifier, used as the HTML class of the panel.
    pub fn key(&self) -> &'static str {
        match self {
            Panel::Feedback(_) => "feedback",
            Panel::MissingPoints(_) => "missing-points",
            Panel::FactualErrors(_) => "factual-errors",
            Panel::NoIssues => "no-issues",
            Panel::CorrectedAnswer(_) => "corrected-answer",
        }
    }

    /// List entries, for the list panels.
    pub fn items(&self) -> Option<&[String]> {
        match self {
            Panel::MissingPoints(items) | Panel::FactualErrors(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Paragraph text, for the prose panels.
    pub fn text(&self) -> Option<&str> {
        match self {
            Panel::Feedback(text) | Panel::CorrectedAnswer(text) => Some(text.as_str()),
            Panel::NoIssues => Some("No missing points or factual errors were found. Great job!"),
            _ => None,
        }
    }
}

/// Display model of an evaluation result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    /// Score ring.
    pub gauge:     ScoreGauge,
    /// Justification shown under the ring.
    pub reasoning: String,
    /// Feedback column, in display order. Always starts with the feedback
    /// panel and ends with the corrected answer.
    pub panels:    Vec<Panel>,
}

impl ResultView {
    /// Lays out `result`.
    pub fn new(result: &EvaluationResult) -> Self {
        let mut panels = vec![Panel::Feedback(result.feedback.clone())];

        if !result.missing_points.is_empty() {
            panels.push(Panel::MissingPoints(result.missing_points.clone()));
        }
        if !result.factual_errors.is_empty() {
            panels.push(Panel::FactualErrors(result.factual_errors.clone()));
        }
        if result.is_flawless() {
            panels.push(Panel::NoIssues);
        }

        panels.push(Panel::CorrectedAnswer(result.corrected_answer.clone()));

        Self {
            gauge: ScoreGauge::new(result.score, result.max_score),
            reasoning: result.reasoning.clone(),
            panels,
        }
    }

    /// Finds the panel with the given key.
    pub fn panel(&self, key: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.key() == key)
    }
}

impl From<&EvaluationResult> for ResultView {
    fn from(result: &EvaluationResult) -> Self {
        Self::new(result)
    }
}
