#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The controller coordinating input validation, the single evaluator call,
//! and the display state derived from both.

use uuid::Uuid;

use crate::{
    constants::{
        BUSY_MESSAGE, EVALUATION_FAILED_MESSAGE, SUBMIT_LABEL, SUBMIT_LABEL_PENDING,
        VALIDATION_MESSAGE,
    },
    evaluator::{EvaluationError, Evaluator},
    input::{Field, InputCollector},
    types::EvaluationResult,
};

/// Why a session refused or failed an evaluation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Either field was empty at submit time.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    /// The evaluator failed; the cause has been logged.
    #[error("{}", EVALUATION_FAILED_MESSAGE)]
    Evaluation,
    /// An evaluation is already outstanding.
    #[error("{}", BUSY_MESSAGE)]
    Busy,
}

impl SessionError {
    /// The message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            SessionError::Validation => VALIDATION_MESSAGE,
            SessionError::Evaluation => EVALUATION_FAILED_MESSAGE,
            SessionError::Busy => BUSY_MESSAGE,
        }
    }
}

/// The mutually exclusive display states of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Only the inputs are shown.
    #[default]
    Idle,
    /// An evaluation is outstanding.
    Loading,
    /// The last submission failed.
    Failed(SessionError),
    /// The last evaluation succeeded.
    Evaluated(EvaluationResult),
}

/// Handle for an outstanding evaluation, returned by [`Session::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Identifies this submission in logs and on completion.
    id:             Uuid,
    /// Answer key as submitted.
    answer_key:     String,
    /// Student answer as submitted.
    student_answer: String,
}

impl Submission {
    /// Returns the submission id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the answer key captured at submit time.
    pub fn answer_key(&self) -> &str {
        &self.answer_key
    }

    /// Returns the student answer captured at submit time.
    pub fn student_answer(&self) -> &str {
        &self.student_answer
    }
}

/// Read-only view of a session for display adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current answer key text.
    pub answer_key:     String,
    /// Current student answer text.
    pub student_answer: String,
    /// Whether the submit control is enabled.
    pub can_submit:     bool,
    /// Label of the submit control.
    pub submit_label:   &'static str,
    /// Display state.
    pub phase:          Phase,
}

impl Snapshot {
    /// Whether the loading indicator is shown.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Error banner text, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Failed(err) => Some(err.message()),
            _ => None,
        }
    }

    /// Result to render, if any.
    pub fn result(&self) -> Option<&EvaluationResult> {
        match &self.phase {
            Phase::Evaluated(result) => Some(result),
            _ => None,
        }
    }
}

/// Owns the form inputs and the display state, and is the only path through
/// which either changes.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The two text fields.
    input:     InputCollector,
    /// Current display state.
    phase:     Phase,
    /// Id of the outstanding submission while loading.
    in_flight: Option<Uuid>,
}

impl Session {
    /// Creates a session over the given inputs, in the idle state.
    pub fn new(input: InputCollector) -> Self {
        Self {
            input,
            phase: Phase::Idle,
            in_flight: None,
        }
    }

    /// Returns the inputs.
    pub fn input(&self) -> &InputCollector {
        &self.input
    }

    /// Returns the display state.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether an evaluation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.input.is_ready()
    }

    /// Label of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            SUBMIT_LABEL_PENDING
        } else {
            SUBMIT_LABEL
        }
    }

    /// Replaces a field. Outside of loading this returns the session to idle.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value);
        if !self.is_loading() {
            self.phase = Phase::Idle;
        }
    }

    /// Replaces the answer key.
    pub fn set_answer_key(&mut self, value: impl Into<String>) {
        self.edit(Field::AnswerKey, value);
    }

    /// Replaces the student answer.
    pub fn set_student_answer(&mut self, value: impl Into<String>) {
        self.edit(Field::StudentAnswer, value);
    }

    /// Starts an evaluation of the current inputs.
    ///
    /// Clears any previous error or result and enters loading. Empty inputs
    /// put the session into the validation error state instead; a session that
    /// is already loading is left untouched.
    pub fn begin(&mut self) -> Result<Submission, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        if !self.input.is_ready() {
            tracing::debug!("Refusing to evaluate: a field is empty");
            self.phase = Phase::Failed(SessionError::Validation);
            return Err(SessionError::Validation);
        }

        let submission = Submission {
            id:             Uuid::new_v4(),
            answer_key:     self.input.answer_key().to_string(),
            student_answer: self.input.student_answer().to_string(),
        };
        self.in_flight = Some(submission.id);
        self.phase = Phase::Loading;
        Ok(submission)
    }

    /// Records the outcome of `submission`.
    ///
    /// Outcomes for anything other than the outstanding submission are
    /// ignored and `false` is returned.
    pub fn complete(
        &mut self,
        submission: &Submission,
        outcome: Result<EvaluationResult, EvaluationError>,
    ) -> bool {
        if self.in_flight != Some(submission.id) {
            tracing::warn!(submission = %submission.id, "Ignoring stale evaluation outcome");
            return false;
        }
        self.in_flight = None;

        self.phase = match outcome {
            Ok(result) => Phase::Evaluated(result),
            Err(err) => {
                tracing::error!(
                    submission = %submission.id,
                    kind = err.kind(),
                    "Evaluation failed: {err}"
                );
                Phase::Failed(SessionError::Evaluation)
            }
        };
        true
    }

    /// Runs one full evaluation against `evaluator`: begin, await, complete.
    pub async fn evaluate<E: Evaluator>(
        &mut self,
        evaluator: &E,
    ) -> Result<&EvaluationResult, SessionError> {
        let submission = self.begin()?;
        let outcome = evaluator
            .evaluate(submission.answer_key(), submission.student_answer())
            .await;
        self.complete(&submission, outcome);

        match &self.phase {
            Phase::Evaluated(result) => Ok(result),
            Phase::Failed(err) => Err(*err),
            Phase::Idle | Phase::Loading => Err(SessionError::Evaluation),
        }
    }

    /// Takes a read-only snapshot for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            answer_key:     self.input.answer_key().to_string(),
            student_answer: self.input.student_answer().to_string(),
            can_submit:     self.can_submit(),
            submit_label:   self.submit_label(),
            phase:          self.phase.clone(),
        }
    }
}
