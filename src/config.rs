#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_openai::{Client as OpenAIClient, config::OpenAIConfig, types::chat::ReasoningEffort};
use reqwest::Client;
use state::InitCell;

use crate::constants::EVALUATOR_SYSTEM_PROMPT;

/// Endpoint used when `OPENAI_ENDPOINT` is not set.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Interface the server binds to when `COPYCHECK_HOST` is not set.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the server binds to when `COPYCHECK_PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Parses the optional reasoning-effort environment value into the OpenAI enum.
/// Unset or unrecognised values leave the parameter out of requests.
fn parse_reasoning_effort(val: Option<String>) -> Option<ReasoningEffort> {
    match val?.trim().to_ascii_lowercase().as_str() {
        "minimal" => Some(ReasoningEffort::Minimal),
        "low" => Some(ReasoningEffort::Low),
        "medium" => Some(ReasoningEffort::Medium),
        "high" => Some(ReasoningEffort::High),
        _ => None,
    }
}

/// Reads a trimmed, non-empty environment variable.
fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parses the optional port override, falling back to [`DEFAULT_PORT`] with a
/// warning when the value is not a valid port.
fn parse_port(val: Option<String>) -> u16 {
    let Some(val) = val else {
        return DEFAULT_PORT;
    };
    val.parse::<u16>().unwrap_or_else(|err| {
        tracing::warn!("Ignoring COPYCHECK_PORT={val:?} ({err}); using {DEFAULT_PORT}");
        DEFAULT_PORT
    })
}

/// OpenAI credentials and optional tuning parameters sourced from the
/// environment.
#[derive(Clone, Debug)]
pub struct OpenAiEnv {
    /// Base URL for the OpenAI-compatible API endpoint.
    api_base:         String,
    /// API key used to authenticate OpenAI requests.
    api_key:          String,
    /// Model identifier for chat completions.
    model:            String,
    /// Optional temperature override, if provided.
    temperature:      Option<f32>,
    /// Optional top-p override, if provided.
    top_p:            Option<f32>,
    /// Optional reasoning effort hint.
    reasoning_effort: Option<ReasoningEffort>,
}

impl OpenAiEnv {
    /// Construct an `OpenAiEnv` from environment variables; returns `None` if
    /// the API key or model is missing.
    fn from_env() -> Option<Self> {
        let api_base =
            read_env("OPENAI_ENDPOINT").unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string());
        let api_key = read_env("OPENAI_API_KEY")?;
        let model = read_env("OPENAI_MODEL")?;

        let temperature = read_env("OPENAI_TEMPERATURE").and_then(|s| s.parse::<f32>().ok());
        let top_p = read_env("OPENAI_TOP_P").and_then(|s| s.parse::<f32>().ok());
        let reasoning_effort = parse_reasoning_effort(read_env("OPENAI_REASONING_EFFORT"));

        Some(Self {
            api_base,
            api_key,
            model,
            temperature,
            top_p,
            reasoning_effort,
        })
    }

    /// Builds a configuration from explicit values, with no tuning overrides.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_base:         api_base.into(),
            api_key:          api_key.into(),
            model:            model.into(),
            temperature:      None,
            top_p:            None,
            reasoning_effort: None,
        }
    }

    /// Returns the API base URL used for OpenAI requests.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the API key used for OpenAI requests.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the configured temperature, if any.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the configured top_p, if any.
    pub fn top_p(&self) -> Option<f32> {
        self.top_p
    }

    /// Returns the configured reasoning effort, if any.
    pub fn reasoning_effort(&self) -> Option<ReasoningEffort> {
        self.reasoning_effort.clone()
    }
}

/// Address the HTTP server listens on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerEnv {
    /// Interface to bind.
    host: String,
    /// Port to bind.
    port: u16,
}

impl ServerEnv {
    /// Reads `COPYCHECK_HOST` and `COPYCHECK_PORT`, falling back to defaults.
    fn from_env() -> Self {
        let host = read_env("COPYCHECK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_port(read_env("COPYCHECK_PORT"));
        Self { host, port }
    }

    /// Returns the configured interface.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// Runtime and prompt configuration shared across the crate.
pub struct ConfigState {
    /// Shared reqwest HTTP client reused by the evaluator.
    http_client:   Client,
    /// Cached OpenAI configuration, if available.
    openai:        Option<OpenAiEnv>,
    /// Lazily constructed OpenAI client.
    openai_client: InitCell<OpenAIClient<OpenAIConfig>>,
    /// Server bind address.
    server:        ServerEnv,
    /// System prompt sent with every evaluation.
    system_prompt: String,
}

impl ConfigState {
    /// Construct a new configuration instance by reading the environment and
    /// prompt assets.
    fn new() -> Result<Self> {
        let http_client = Client::builder()
            // Avoid macOS dynamic store lookups that fail in sandboxed environments.
            .no_proxy()
            .build()
            .context("Failed to construct shared HTTP client")?;

        Ok(Self {
            http_client,
            openai: OpenAiEnv::from_env(),
            openai_client: InitCell::new(),
            server: ServerEnv::from_env(),
            system_prompt: EVALUATOR_SYSTEM_PROMPT.to_string(),
        })
    }

    /// Returns a clone of the shared reqwest HTTP client.
    pub fn http_client(&self) -> Client {
        self.http_client.clone()
    }

    /// Returns the OpenAI configuration, if the required environment variables
    /// are present.
    pub fn openai(&self) -> Option<&OpenAiEnv> {
        self.openai.as_ref()
    }

    /// Returns the OpenAI client for the configured endpoint, building it on
    /// first use.
    pub fn openai_client(&self) -> Option<OpenAIClient<OpenAIConfig>> {
        if let Some(client) = self.openai_client.try_get() {
            return Some(client.clone());
        }

        let env = self.openai.as_ref()?;
        self.openai_client
            .set(build_openai_client(env, self.http_client()));
        Some(self.openai_client.get().clone())
    }

    /// Returns the server bind address.
    pub fn server(&self) -> &ServerEnv {
        &self.server
    }

    /// Returns the evaluator system prompt.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// Builds an OpenAI client for `env` on top of an existing HTTP client.
pub fn build_openai_client(env: &OpenAiEnv, http_client: Client) -> OpenAIClient<OpenAIConfig> {
    OpenAIClient::with_config(
        OpenAIConfig::new()
            .with_api_base(env.api_base())
            .with_api_key(env.api_key()),
    )
    .with_http_client(http_client)
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global configuration, built on first use.
static CONFIG: Mutex<Option<ConfigHandle>> = Mutex::new(None);

/// Returns the active configuration, initializing it on demand.
pub fn get() -> Result<ConfigHandle> {
    let mut guard = CONFIG
        .lock()
        .map_err(|_| anyhow::anyhow!("config slot poisoned"))?;
    if let Some(cfg) = guard.as_ref() {
        return Ok(cfg.clone());
    }

    let cfg = ConfigHandle(Arc::new(ConfigState::new()?));
    *guard = Some(cfg.clone());
    Ok(cfg)
}
