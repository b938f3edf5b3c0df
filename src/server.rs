#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Browser surface: the form, its submissions, and a JSON endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    evaluator::Evaluator,
    input::InputCollector,
    present::html::{render_outcome, render_page},
    session::{Session, SessionError},
    types::EvaluationRequest,
};

/// Shared state handed to every handler.
pub struct AppState<E> {
    /// The evaluator all sessions call.
    evaluator: Arc<E>,
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}

impl<E> AppState<E> {
    /// Wraps an evaluator.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }
}

/// Url-encoded body of a form submission.
#[derive(Debug, Deserialize)]
pub struct EvaluateForm {
    /// The answer key or marking criteria.
    #[serde(default)]
    answer_key:     String,
    /// The student's answer.
    #[serde(default)]
    student_answer: String,
}

/// Builds the router over `evaluator`.
pub fn routes<E>(evaluator: E) -> Router
where
    E: Evaluator + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/evaluate", post(evaluate_form::<E>))
        .route("/evaluate/outcome", post(evaluate_outcome::<E>))
        .route("/api/evaluate", post(evaluate_json::<E>))
        .route("/health", get(health))
        .with_state(AppState::new(evaluator))
}

/// Binds `host:port`. `host` may be an IP literal or a name to resolve, such
/// as `localhost`.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}

/// Serves the router over an already bound listener until the process is
/// stopped.
pub async fn serve_on<E>(listener: TcpListener, evaluator: E) -> Result<()>
where
    E: Evaluator + Send + Sync + 'static,
{
    let addr = listener
        .local_addr()
        .context("Failed to read the bound address")?;

    tracing::info!("Serving on http://{addr}");
    axum::serve(listener, routes(evaluator))
        .await
        .context("Server stopped unexpectedly")
}

/// Binds `host:port` and serves until the process is stopped.
pub async fn serve<E>(evaluator: E, host: &str, port: u16) -> Result<()>
where
    E: Evaluator + Send + Sync + 'static,
{
    let listener = bind(host, port).await?;
    serve_on(listener, evaluator).await
}

/// `GET /health`
async fn health() -> &'static str {
    "OK"
}

/// `GET /`: the form with its demonstration values.
async fn index() -> Html<String> {
    Html(render_page(&Session::default().snapshot()))
}

/// Runs one evaluation of a form submission and picks the status code for its
/// outcome.
async fn evaluate_submission<E>(evaluator: &E, form: EvaluateForm) -> (StatusCode, Session)
where
    E: Evaluator + Send + Sync + 'static,
{
    let mut session = Session::new(InputCollector::new(form.answer_key, form.student_answer));
    let status = match session.evaluate(evaluator).await {
        Ok(_) => StatusCode::OK,
        Err(SessionError::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(SessionError::Evaluation | SessionError::Busy) => StatusCode::BAD_GATEWAY,
    };
    (status, session)
}

/// `POST /evaluate`: evaluates a form submission and renders the whole page.
async fn evaluate_form<E>(
    State(state): State<AppState<E>>,
    Form(form): Form<EvaluateForm>,
) -> Response
where
    E: Evaluator + Send + Sync + 'static,
{
    let (status, session) = evaluate_submission(state.evaluator.as_ref(), form).await;
    (status, Html(render_page(&session.snapshot()))).into_response()
}

/// `POST /evaluate/outcome`: evaluates a form submission and renders only the
/// error banner or result section, for the page to swap in place.
async fn evaluate_outcome<E>(
    State(state): State<AppState<E>>,
    Form(form): Form<EvaluateForm>,
) -> Response
where
    E: Evaluator + Send + Sync + 'static,
{
    let (status, session) = evaluate_submission(state.evaluator.as_ref(), form).await;
    (status, Html(render_outcome(&session.snapshot()))).into_response()
}

/// `POST /api/evaluate`: JSON in, `EvaluationResult` or `{error}` out.
async fn evaluate_json<E>(
    State(state): State<AppState<E>>,
    Json(request): Json<EvaluationRequest>,
) -> Response
where
    E: Evaluator + Send + Sync + 'static,
{
    let mut session =
        Session::new(InputCollector::new(request.answer_key, request.student_answer));
    match session.evaluate(state.evaluator.as_ref()).await {
        Ok(result) => Json(result.clone()).into_response(),
        Err(err) => {
            let status = match err {
                SessionError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                SessionError::Evaluation | SessionError::Busy => StatusCode::BAD_GATEWAY,
            };
            (status, Json(json!({ "error": err.message() }))).into_response()
        }
    }
}
