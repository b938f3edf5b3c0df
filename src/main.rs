#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # copycheck
//!
//! Scores a student's answer against an answer key.
//!
//! * `copycheck serve` starts the browser form.
//! * `copycheck evaluate KEY_FILE ANSWER_FILE` evaluates two text files.
//! * `copycheck demo` evaluates the built-in demonstration answer.
//!
//! The evaluator is configured through `OPENAI_API_KEY`, `OPENAI_MODEL` and
//! optionally `OPENAI_ENDPOINT`, read from the environment or a `.env` file.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use bpaf::*;
use copycheck::{
    Evaluator, InputCollector, OpenAiEvaluator, Session, config,
    constants::EVALUATION_FAILED_MESSAGE,
    present::{ResultView, terminal},
    server,
};
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Serve the browser form
    Serve {
        /// Interface override
        host: Option<String>,
        /// Port override
        port: Option<u16>,
    },
    /// Evaluate an answer read from files
    Evaluate {
        /// Path to the answer key
        key:    PathBuf,
        /// Path to the student answer
        answer: PathBuf,
        /// Print the raw result as JSON
        json:   bool,
    },
    /// Evaluate the demonstration answer
    Demo {
        /// Print the raw result as JSON
        json: bool,
    },
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the JSON output switch
    fn json_switch() -> impl Parser<bool> {
        long("json").help("Print the result as JSON").switch()
    }

    let host = long("host")
        .help("Interface to listen on (default: COPYCHECK_HOST or 127.0.0.1)")
        .argument::<String>("HOST")
        .optional();
    let port = long("port")
        .help("Port to listen on (default: COPYCHECK_PORT or 3000)")
        .argument::<u16>("PORT")
        .optional();
    let serve = construct!(Cmd::Serve { host, port })
        .to_options()
        .command("serve")
        .help("Serve the evaluation form over HTTP");

    let key = positional::<PathBuf>("KEY_FILE").help("File holding the answer key or rubric");
    let answer = positional::<PathBuf>("ANSWER_FILE").help("File holding the student's answer");
    let json = json_switch();
    let evaluate = construct!(Cmd::Evaluate { json, key, answer })
        .to_options()
        .command("evaluate")
        .help("Evaluate a student's answer against an answer key");

    let json = json_switch();
    let demo = construct!(Cmd::Demo { json })
        .to_options()
        .command("demo")
        .help("Evaluate the built-in demonstration answer");

    let cmd = construct!([serve, evaluate, demo]);

    cmd.to_options()
        .descr("AI-powered answer sheet evaluator")
        .run()
}

/// Evaluates `input` once and prints the outcome. Failures are reported on
/// stderr and turn into a failing exit code.
async fn evaluate_and_print(input: InputCollector, json: bool) -> Result<ExitCode> {
    let evaluator = OpenAiEvaluator::from_config()?;
    let mut session = Session::new(input);

    if let Ok(submission) = session.begin() {
        eprintln!("{}", session.submit_label());
        let outcome = evaluator
            .evaluate(submission.answer_key(), submission.student_answer())
            .await;
        session.complete(&submission, outcome);
    }

    let snapshot = session.snapshot();
    if let Some(result) = snapshot.result() {
        if json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            println!("{}", terminal::render_result(&ResultView::new(result)));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let message = snapshot
        .error_message()
        .unwrap_or(EVALUATION_FAILED_MESSAGE);
    eprintln!("{}", terminal::render_error(message));
    Ok(ExitCode::FAILURE)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();

    let level = std::env::var("COPYCHECK_LOG")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(level);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let code = match options() {
        Cmd::Serve { host, port } => {
            let cfg = config::get()?;
            let host = host.unwrap_or_else(|| cfg.server().host().to_string());
            let port = port.unwrap_or_else(|| cfg.server().port());
            let evaluator = OpenAiEvaluator::from_config()?;
            server::serve(evaluator, &host, port).await?;
            ExitCode::SUCCESS
        }
        Cmd::Evaluate { key, answer, json } => {
            let answer_key = std::fs::read_to_string(&key)
                .with_context(|| format!("Could not read answer key from {}", key.display()))?;
            let student_answer = std::fs::read_to_string(&answer).with_context(|| {
                format!("Could not read student answer from {}", answer.display())
            })?;
            evaluate_and_print(InputCollector::new(answer_key, student_answer), json).await?
        }
        Cmd::Demo { json } => evaluate_and_print(InputCollector::default(), json).await?,
    };

    Ok(code)
}
