#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::constants::{
    ANSWER_KEY_LABEL, ANSWER_KEY_PLACEHOLDER, DEMO_ANSWER_KEY, DEMO_STUDENT_ANSWER,
    STUDENT_ANSWER_LABEL, STUDENT_ANSWER_PLACEHOLDER,
};

/// Identifies one of the two text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The answer key or rubric.
    AnswerKey,
    /// The student's answer.
    StudentAnswer,
}

impl Field {
    /// Form/element id of the field.
    pub fn id(self) -> &'static str {
        match self {
            Field::AnswerKey => "answer_key",
            Field::StudentAnswer => "student_answer",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::AnswerKey => ANSWER_KEY_LABEL,
            Field::StudentAnswer => STUDENT_ANSWER_LABEL,
        }
    }

    /// Placeholder shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::AnswerKey => ANSWER_KEY_PLACEHOLDER,
            Field::StudentAnswer => STUDENT_ANSWER_PLACEHOLDER,
        }
    }
}

/// Holds the two free-text inputs of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCollector {
    /// The answer key or marking criteria.
    answer_key:     String,
    /// The student's answer.
    student_answer: String,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(DEMO_ANSWER_KEY, DEMO_STUDENT_ANSWER)
    }
}

impl InputCollector {
    /// Creates a collector holding the given texts.
    pub fn new(answer_key: impl Into<String>, student_answer: impl Into<String>) -> Self {
        Self {
            answer_key:     answer_key.into(),
            student_answer: student_answer.into(),
        }
    }

    /// Returns the answer key as entered.
    pub fn answer_key(&self) -> &str {
        &self.answer_key
    }

    /// Returns the student answer as entered.
    pub fn student_answer(&self) -> &str {
        &self.student_answer
    }

    /// Returns the current value of `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::AnswerKey => &self.answer_key,
            Field::StudentAnswer => &self.student_answer,
        }
    }

    /// Replaces the answer key.
    pub fn set_answer_key(&mut self, value: impl Into<String>) {
        self.answer_key = value.into();
    }

    /// Replaces the student answer.
    pub fn set_student_answer(&mut self, value: impl Into<String>) {
        self.student_answer = value.into();
    }

    /// Replaces the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::AnswerKey => self.set_answer_key(value),
            Field::StudentAnswer => self.set_student_answer(value),
        }
    }

    /// True when both fields hold something other than whitespace.
    pub fn is_ready(&self) -> bool {
        !self.answer_key.trim().is_empty() && !self.student_answer.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_demo_values() {
        let input = InputCollector::default();
        assert_eq!(input.answer_key(), DEMO_ANSWER_KEY);
        assert_eq!(input.student_answer(), DEMO_STUDENT_ANSWER);
        assert!(input.is_ready());
    }

    #[test]
    fn whitespace_only_field_is_not_ready() {
        let mut input = InputCollector::default();
        input.set(Field::StudentAnswer, " \n\t ");
        assert!(!input.is_ready());

        input.set_student_answer("Plants make food.");
        input.set_answer_key("");
        assert!(!input.is_ready());

        input.set(Field::AnswerKey, "The sky is blue.");
        assert!(input.is_ready());
        assert_eq!(input.value(Field::AnswerKey), "The sky is blue.");
    }

    #[test]
    fn values_are_kept_untrimmed() {
        let input = InputCollector::new("  key  ", "answer\n");
        assert_eq!(input.answer_key(), "  key  ");
        assert_eq!(input.student_answer(), "answer\n");
    }
}
