use copycheck::{
    InputCollector, Phase, Session, SessionError,
    constants::{DEMO_STUDENT_ANSWER, SUBMIT_LABEL, SUBMIT_LABEL_PENDING, VALIDATION_MESSAGE},
    evaluator::parse_evaluation,
};

#[path = "eval_support.rs"]
mod eval_support;

use eval_support::{ScriptedEvaluator, flawless_result, sample_result};

#[tokio::test]
async fn empty_student_answer_never_reaches_the_evaluator() {
    let evaluator = ScriptedEvaluator::succeeding(sample_result());
    let mut session = Session::new(InputCollector::new("The sky is blue.", ""));

    assert!(!session.can_submit());
    let err = session.evaluate(&evaluator).await.unwrap_err();

    assert_eq!(err, SessionError::Validation);
    assert_eq!(err.message(), VALIDATION_MESSAGE);
    assert_eq!(
        session.snapshot().error_message(),
        Some("Please provide both the answer key and the student's answer.")
    );
    assert_eq!(evaluator.calls(), 0);
}

#[tokio::test]
async fn whitespace_only_fields_are_rejected() {
    let evaluator = ScriptedEvaluator::succeeding(sample_result());
    for (key, answer) in [("   ", "answer"), ("key", "\n\t"), ("", "")] {
        let mut session = Session::new(InputCollector::new(key, answer));
        assert!(!session.can_submit());
        assert_eq!(session.evaluate(&evaluator).await.unwrap_err(), SessionError::Validation);
    }
    assert_eq!(evaluator.calls(), 0);
}

#[tokio::test]
async fn success_shows_the_evaluator_result() {
    let evaluator = ScriptedEvaluator::succeeding(sample_result());
    let mut session = Session::default();

    let result = session.evaluate(&evaluator).await.unwrap().clone();
    assert_eq!(result, sample_result());

    let snapshot = session.snapshot();
    assert_eq!(snapshot.result(), Some(&sample_result()));
    assert!(snapshot.error_message().is_none());
    assert!(snapshot.can_submit);
    assert_eq!(snapshot.submit_label, SUBMIT_LABEL);
    assert_eq!(evaluator.seen(), vec![(
        session.input().answer_key().to_string(),
        session.input().student_answer().to_string()
    )]);
}

#[test]
fn pending_evaluation_disables_submit() {
    let mut session = Session::default();
    let submission = session.begin().unwrap();

    assert_eq!(session.phase(), &Phase::Loading);
    assert!(!session.can_submit());
    assert_eq!(session.submit_label(), SUBMIT_LABEL_PENDING);
    assert_eq!(session.begin().unwrap_err(), SessionError::Busy);
    assert_eq!(session.phase(), &Phase::Loading);

    session.set_student_answer("Edited while waiting.");
    assert_eq!(session.phase(), &Phase::Loading);
    assert_eq!(session.input().student_answer(), "Edited while waiting.");
    assert_eq!(submission.student_answer(), DEMO_STUDENT_ANSWER);

    assert!(session.complete(&submission, Ok(sample_result())));
    assert!(session.can_submit());
    assert_eq!(session.submit_label(), SUBMIT_LABEL);
}

#[test]
fn failure_re_enables_submit() {
    let mut session = Session::default();
    let submission = session.begin().unwrap();

    let err = parse_evaluation("").unwrap_err();
    assert!(session.complete(&submission, Err(err)));

    assert_eq!(session.phase(), &Phase::Failed(SessionError::Evaluation));
    assert!(session.can_submit());
}

#[test]
fn outcomes_for_other_submissions_are_ignored() {
    let mut session = Session::default();
    let mut other = Session::default();
    let _mine = session.begin().unwrap();
    let foreign = other.begin().unwrap();

    assert!(!session.complete(&foreign, Ok(sample_result())));
    assert_eq!(session.phase(), &Phase::Loading);
}

#[tokio::test]
async fn failure_clears_previous_result_and_success_clears_error() {
    let evaluator = ScriptedEvaluator::new([
        Ok(sample_result()),
        Err("{ not json".to_string()),
        Ok(flawless_result()),
    ]);
    let mut session = Session::default();

    session.evaluate(&evaluator).await.unwrap();
    assert!(session.snapshot().result().is_some());

    assert_eq!(session.evaluate(&evaluator).await.unwrap_err(), SessionError::Evaluation);
    let snapshot = session.snapshot();
    assert!(snapshot.result().is_none());
    assert!(snapshot.error_message().unwrap().contains("try again"));

    session.evaluate(&evaluator).await.unwrap();
    let snapshot = session.snapshot();
    assert!(snapshot.error_message().is_none());
    assert_eq!(snapshot.result(), Some(&flawless_result()));
    assert_eq!(evaluator.calls(), 3);
}

#[test]
fn starting_a_new_evaluation_clears_the_error() {
    let mut session = Session::new(InputCollector::new("key", ""));
    assert_eq!(session.begin().unwrap_err(), SessionError::Validation);
    assert!(session.snapshot().error_message().is_some());

    session.set_student_answer("answer");
    session.begin().unwrap();
    let snapshot = session.snapshot();
    assert!(snapshot.is_loading());
    assert!(snapshot.error_message().is_none());
    assert!(snapshot.result().is_none());
}

#[tokio::test]
async fn editing_after_a_result_returns_to_idle() {
    let evaluator = ScriptedEvaluator::succeeding(sample_result());
    let mut session = Session::default();
    session.evaluate(&evaluator).await.unwrap();

    session.set_answer_key("A new rubric.");
    assert_eq!(session.phase(), &Phase::Idle);
    assert!(session.snapshot().result().is_none());
}

#[tokio::test]
async fn out_of_range_scores_are_failures() {
    let raw = serde_json::to_string(&sample_result())
        .unwrap()
        .replace("\"score\":6", "\"score\":12");
    let evaluator = ScriptedEvaluator::new([Err(raw)]);
    let mut session = Session::default();

    assert_eq!(session.evaluate(&evaluator).await.unwrap_err(), SessionError::Evaluation);
    assert_eq!(evaluator.calls(), 1);
}

#[test]
fn error_display_matches_user_message() {
    for err in [SessionError::Validation, SessionError::Evaluation, SessionError::Busy] {
        assert_eq!(err.to_string(), err.message());
    }
    assert_eq!(SessionError::Busy.to_string(), "An evaluation is already in progress.");
}
