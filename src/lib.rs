//! # copycheck
//!
//! Scores a student's answer against an answer key with an AI evaluator and
//! renders the structured feedback it returns, in a browser or a terminal.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// A module defining the constant values used throughout
pub mod constants;
/// Environment-driven configuration
pub mod config;
/// The remote evaluator and its errors
pub mod evaluator;
/// The two text inputs of an evaluation
pub mod input;
/// View models and renderers for evaluation results
pub mod present;
/// HTTP server for the browser surface
pub mod server;
/// The evaluation state machine
pub mod session;
/// Shared data types
pub mod types;

pub use evaluator::{EvaluationError, Evaluator, OpenAiEvaluator};
pub use input::{Field, InputCollector};
pub use session::{Phase, Session, SessionError, Snapshot, Submission};
pub use types::{EvaluationRequest, EvaluationResult};
