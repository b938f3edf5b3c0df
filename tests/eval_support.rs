//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    future::Future,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use copycheck::{EvaluationError, EvaluationResult, Evaluator, evaluator::parse_evaluation};

/// An evaluator that replays scripted outcomes and records its calls.
///
/// `Err(raw)` entries are turned into errors by parsing `raw` as evaluator
/// content, so `""` yields an empty response and `"{"` a malformed one.
#[derive(Default)]
pub struct ScriptedEvaluator {
    outcomes: Mutex<VecDeque<Result<EvaluationResult, String>>>,
    calls:    AtomicUsize,
    seen:     Mutex<Vec<(String, String)>>,
}

impl ScriptedEvaluator {
    pub fn new(outcomes: impl IntoIterator<Item = Result<EvaluationResult, String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn succeeding(result: EvaluationResult) -> Self {
        Self::new([Ok(result)])
    }

    pub fn failing() -> Self {
        Self::new([Err("{ not json".to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Evaluator for ScriptedEvaluator {
    fn evaluate(
        &self,
        answer_key: &str,
        student_answer: &str,
    ) -> impl Future<Output = Result<EvaluationResult, EvaluationError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((answer_key.to_string(), student_answer.to_string()));
        let next = self.outcomes.lock().unwrap().pop_front();

        async move {
            match next {
                Some(Ok(result)) => Ok(result),
                Some(Err(raw)) => parse_evaluation(&raw),
                None => Err(EvaluationError::EmptyResponse),
            }
        }
    }
}

pub fn sample_result() -> EvaluationResult {
    EvaluationResult::builder()
        .score(6)
        .max_score(10)
        .reasoning("Covers the inputs and outputs but not chlorophyll.")
        .feedback("Mention the pigment and the balanced equation.")
        .missing_points(vec![
            "Role of chlorophyll".to_string(),
            "Balanced chemical equation".to_string(),
        ])
        .factual_errors(vec!["Photosynthesis is not why plants are green.".to_string()])
        .corrected_answer("Photosynthesis converts light energy into chemical energy.")
        .build()
}

pub fn flawless_result() -> EvaluationResult {
    EvaluationResult::builder()
        .score(10)
        .max_score(10)
        .reasoning("Complete and correct.")
        .feedback("Keep it up.")
        .corrected_answer("Same as submitted.")
        .build()
}
