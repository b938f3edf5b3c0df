#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The remote evaluator seam and its OpenAI-backed implementation.

use std::future::Future;

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::{self, OpenAiEnv},
    types::EvaluationResult,
};

/// Name given to the structured response schema.
const RESPONSE_SCHEMA_NAME: &str = "evaluation_result";

/// Everything that can go wrong while asking the evaluator for a result.
///
/// Callers only surface a generic failure; the variants exist for the logs.
#[derive(thiserror::Error, Debug)]
pub enum EvaluationError {
    /// No evaluator credentials were configured.
    #[error("The evaluator is not configured: {0}")]
    NotConfigured(String),
    /// The request could not be built, sent, or was rejected remotely.
    #[error("The evaluation request failed: {0}")]
    Request(#[from] OpenAIError),
    /// The evaluator answered without any content.
    #[error("The evaluator returned an empty response.")]
    EmptyResponse,
    /// The evaluator's content was not a valid evaluation result.
    #[error("The evaluator returned a malformed response: {source}\nResponse:\n```\n{raw}\n```")]
    Malformed {
        /// Why parsing failed.
        source: serde_json::Error,
        /// The content as received.
        raw:    String,
    },
    /// The evaluator awarded more points than the rubric allows.
    #[error("The evaluator returned a score of {score} out of {max_score}.")]
    ScoreOutOfRange {
        /// Score as returned.
        score:     u32,
        /// Ceiling as returned.
        max_score: u32,
    },
}

impl EvaluationError {
    /// Short machine-friendly name of the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::NotConfigured(_) => "not_configured",
            EvaluationError::Request(_) => "request",
            EvaluationError::EmptyResponse => "empty_response",
            EvaluationError::Malformed { .. } => "malformed_response",
            EvaluationError::ScoreOutOfRange { .. } => "score_out_of_range",
        }
    }
}

/// Something that scores a student answer against an answer key.
pub trait Evaluator {
    /// Evaluates `student_answer` against `answer_key`.
    ///
    /// Both texts are expected to be non-empty after trimming; callers
    /// validate before invoking.
    fn evaluate(
        &self,
        answer_key: &str,
        student_answer: &str,
    ) -> impl Future<Output = Result<EvaluationResult, EvaluationError>> + Send;
}

/// Parses evaluator content into a result, accepting an optional Markdown
/// code fence around the JSON and enforcing the score bound.
pub fn parse_evaluation(content: &str) -> Result<EvaluationResult, EvaluationError> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(EvaluationError::EmptyResponse);
    }

    let result: EvaluationResult =
        serde_json::from_str(body).map_err(|source| EvaluationError::Malformed {
            source,
            raw: content.to_string(),
        })?;

    if !result.score_in_bounds() {
        return Err(EvaluationError::ScoreOutOfRange {
            score:     result.score,
            max_score: result.max_score,
        });
    }

    Ok(result)
}

/// Removes a surrounding ```` ``` ```` or ```` ```json ```` fence, if present.
fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// JSON schema of [`EvaluationResult`] as sent in the response format.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "score": {
                "type": "integer",
                "description": "Points awarded to the student answer."
            },
            "maxScore": {
                "type": "integer",
                "description": "Maximum points available under the answer key."
            },
            "reasoning": {
                "type": "string",
                "description": "A brief justification for the score."
            },
            "feedback": {
                "type": "string",
                "description": "Constructive feedback for the student."
            },
            "missingPoints": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Key points from the answer key missing in the answer."
            },
            "factualErrors": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Incorrect statements made in the answer."
            },
            "correctedAnswer": {
                "type": "string",
                "description": "An improved version of the student's answer."
            }
        },
        "required": [
            "score",
            "maxScore",
            "reasoning",
            "feedback",
            "missingPoints",
            "factualErrors",
            "correctedAnswer"
        ],
        "additionalProperties": false
    })
}

/// Builds the user message carrying both texts.
fn user_prompt(answer_key: &str, student_answer: &str) -> String {
    format!(
        "## Answer Key\n\n```\n{}\n```\n\n## Student's Answer\n\n```\n{}\n```\n",
        answer_key.trim(),
        student_answer.trim()
    )
}

/// Evaluator backed by an OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct OpenAiEvaluator {
    /// Client for the configured endpoint, if credentials were found.
    client:        Option<OpenAIClient<OpenAIConfig>>,
    /// Model and tuning parameters.
    env:           Option<OpenAiEnv>,
    /// System prompt sent with every request.
    system_prompt: String,
}

impl OpenAiEvaluator {
    /// Creates an evaluator from the global configuration.
    ///
    /// Missing credentials do not fail here; every evaluation then fails with
    /// [`EvaluationError::NotConfigured`].
    pub fn from_config() -> anyhow::Result<Self> {
        let cfg = config::get()?;
        if cfg.openai().is_none() {
            tracing::warn!(
                "OPENAI_API_KEY and OPENAI_MODEL are not set; evaluations will fail until they are."
            );
        }
        Ok(Self {
            client:        cfg.openai_client(),
            env:           cfg.openai().cloned(),
            system_prompt: cfg.system_prompt().to_string(),
        })
    }

    /// Creates an evaluator for an explicit endpoint.
    pub fn new(env: OpenAiEnv, http_client: reqwest::Client, system_prompt: String) -> Self {
        Self {
            client: Some(config::build_openai_client(&env, http_client)),
            env: Some(env),
            system_prompt,
        }
    }

    /// Builds the chat messages for one evaluation.
    fn messages(
        &self,
        answer_key: &str,
        student_answer: &str,
    ) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt(answer_key, student_answer))
                .build()?
                .into(),
        ])
    }
}

impl Evaluator for OpenAiEvaluator {
    async fn evaluate(
        &self,
        answer_key: &str,
        student_answer: &str,
    ) -> Result<EvaluationResult, EvaluationError> {
        let (Some(client), Some(env)) = (self.client.as_ref(), self.env.as_ref()) else {
            return Err(EvaluationError::NotConfigured(
                "OPENAI_API_KEY and OPENAI_MODEL must be set".to_string(),
            ));
        };

        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, model = env.model(), "Requesting evaluation");

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(env.model())
            .messages(self.messages(answer_key, student_answer)?)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: Some("Structured evaluation of a student answer".to_string()),
                    name:        RESPONSE_SCHEMA_NAME.to_string(),
                    schema:      Some(response_schema()),
                    strict:      Some(true),
                },
            });
        if let Some(temperature) = env.temperature() {
            args.temperature(temperature);
        }
        if let Some(top_p) = env.top_p() {
            args.top_p(top_p);
        }
        if let Some(effort) = env.reasoning_effort() {
            args.reasoning_effort(effort);
        }
        let request = args.build()?;

        let response = client.chat().create(request).await?;
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or(EvaluationError::EmptyResponse)?;

        let result = parse_evaluation(&content)?;
        tracing::info!(
            %request_id,
            score = result.score,
            max_score = result.max_score,
            "Evaluation received"
        );
        Ok(result)
    }
}
