//! `refine review`: one source file in, one model call, one output file out.
//!
//! The model reply goes through [`Interpreter`]; this module only applies the
//! outcome. Artifacts overwrite the output file, an unparsed reply writes
//! nothing and is shown raw.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use refine_client::{ChatModel, ModelClient};
use refine_core::{Interpreter, Outcome, ReviewPrompt};
use tracing::{debug, info, warn};

use crate::cli::args::ReviewArgs;
use crate::exit_codes::{FAILED, SUCCESS};

/// What a review run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewReport {
    /// Input file absent; the model was not called.
    InputMissing { input: PathBuf },
    /// Structured reply: code written, issues listed.
    Structured { output: PathBuf, issues: Vec<String> },
    /// Fenced code block: code written.
    CodeBlock { output: PathBuf },
    /// Nothing usable in the reply; nothing written.
    Unparsed { raw_text: String },
}

impl ReviewReport {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Structured { .. } | Self::CodeBlock { .. } => SUCCESS,
            Self::InputMissing { .. } | Self::Unparsed { .. } => FAILED,
        }
    }

    /// Operator-facing summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            Self::InputMissing { input } => {
                let _ = writeln!(out, "{} not found in this folder.", input.display());
                let _ = writeln!(out, "Create {} first.", input.display());
            }
            Self::Structured { output, issues } => {
                let _ = writeln!(out, "\nIssues found:");
                for (i, issue) in issues.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, issue);
                }
                let _ = writeln!(out, "\nSaved improved code to: {}", output.display());
            }
            Self::CodeBlock { output } => {
                let _ = writeln!(
                    out,
                    "\nModel returned a code block (not JSON). Saved to: {}",
                    output.display()
                );
                let _ = writeln!(out, "\nNext:");
                if is_python(output) {
                    let _ = writeln!(out, "  python {}", output.display());
                    let _ = writeln!(out, "  open: http://127.0.0.1:5000/?name=Mohammad");
                } else {
                    let _ = writeln!(out, "  run {}", output.display());
                }
            }
            Self::Unparsed { raw_text } => {
                let _ = writeln!(out, "Could not parse JSON or find a code block.");
                let _ = writeln!(out, "RAW OUTPUT:\n{}", raw_text);
            }
        }
        out
    }
}

fn is_python(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}

pub async fn run(args: ReviewArgs) -> anyhow::Result<i32> {
    let client = ModelClient::new(args.model.client_config())?;
    let report = execute(&client, &args.input, &args.output, &args.language).await?;
    print!("{}", report.render());
    Ok(report.exit_code())
}

/// Run a review against any chat model.
pub(crate) async fn execute(
    model: &dyn ChatModel,
    input: &Path,
    output: &Path,
    language: &str,
) -> anyhow::Result<ReviewReport> {
    if !input.exists() {
        debug!(input = %input.display(), "input file missing, skipping model call");
        return Ok(ReviewReport::InputMissing {
            input: input.to_path_buf(),
        });
    }

    let code = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let interpreter = Interpreter::new(language);
    let prompt = ReviewPrompt::new(interpreter.language(), &code);

    println!("Calling model ({})...", model.model_name());
    info!(model = model.model_name(), input = %input.display(), "requesting review");
    let reply = model
        .chat(&prompt.messages())
        .await
        .inspect_err(|e| {
            if e.is_transport() {
                warn!(error = %e, "model server did not answer; `refine check` probes it");
            }
        })
        .context("review aborted: model call failed")?;

    let outcome = interpreter.interpret(&reply);
    info!(stage = outcome.stage(), "model reply interpreted");

    apply(outcome, output)
}

fn apply(outcome: Outcome, output: &Path) -> anyhow::Result<ReviewReport> {
    match outcome {
        Outcome::StructuredArtifact { issues, code } => {
            let output = write_output(output, &code)?;
            Ok(ReviewReport::Structured { output, issues })
        }
        Outcome::RawArtifact { code } => {
            let output = write_output(output, &code)?;
            Ok(ReviewReport::CodeBlock { output })
        }
        Outcome::Unparsed { raw_text } => Ok(ReviewReport::Unparsed { raw_text }),
    }
}

/// Overwrite `path` with `code`; returns the resolved path for display.
fn write_output(path: &Path, code: &str) -> anyhow::Result<PathBuf> {
    std::fs::write(path, code).with_context(|| format!("failed to write {}", path.display()))?;
    info!(output = %path.display(), bytes = code.len(), "improved code written");
    Ok(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use refine_client::{ClientError, ClientResult};
    use refine_core::{ChatMessage, Role};
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct MockModel {
        reply: ClientResult<String>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl MockModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn timing_out() -> Self {
            Self {
                reply: Err(ClientError::Timeout {
                    message: "deadline elapsed".to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(ClientError::Status {
                    status,
                    body: "boom".to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatModel for MockModel {
        async fn chat(&self, messages: &[ChatMessage]) -> ClientResult<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(ClientError::Status { status, body }) => Err(ClientError::Status {
                    status: *status,
                    body: body.clone(),
                }),
                Err(ClientError::Timeout { message }) => Err(ClientError::Timeout {
                    message: message.clone(),
                }),
                Err(other) => panic!("unexpected mock error {:?}", other),
            }
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn missing_input_skips_model_call() {
        let tmp = tempdir().unwrap();
        let model = MockModel::replying("```python\nx\n```");
        let input = tmp.path().join("original_app.py");
        let output = tmp.path().join("improved_app.py");

        let report = execute(&model, &input, &output, "python").await.unwrap();

        assert_eq!(report, ReviewReport::InputMissing { input });
        assert_eq!(report.exit_code(), FAILED);
        assert_eq!(model.calls(), 0);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn structured_reply_writes_decoded_code() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("original_app.py");
        let output = tmp.path().join("improved_app.py");
        std::fs::write(&input, "print(0)\n").unwrap();
        std::fs::write(&output, "stale").unwrap();

        let model = MockModel::replying(
            r#"{"issues": ["a", "b"], "improved_code_b64": "cHJpbnQoMSk="}"#,
        );
        let report = execute(&model, &input, &output, "python").await.unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "print(1)");
        match &report {
            ReviewReport::Structured { issues, .. } => assert_eq!(issues, &["a", "b"]),
            other => panic!("expected Structured, got {:?}", other),
        }
        assert_eq!(report.exit_code(), SUCCESS);
        let text = report.render();
        assert!(text.contains("1. a\n2. b"));
        assert!(text.contains("Saved improved code to:"));

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0][0].role, Role::System);
        assert!(seen[0][1].content.ends_with("print(0)"));
    }

    #[tokio::test]
    async fn fenced_reply_writes_block() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("app.py");
        let output = tmp.path().join("out.py");
        std::fs::write(&input, "x = 1").unwrap();

        let model = MockModel::replying("Here:\n```python\nprint(2)\n```");
        let report = execute(&model, &input, &output, "python").await.unwrap();

        assert!(matches!(report, ReviewReport::CodeBlock { .. }));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "print(2)");
        assert!(report.render().contains("not JSON"));
    }

    #[tokio::test]
    async fn unparsed_reply_writes_nothing() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("app.py");
        let output = tmp.path().join("out.py");
        std::fs::write(&input, "x = 1").unwrap();

        let model = MockModel::replying("no json, no fences here");
        let report = execute(&model, &input, &output, "python").await.unwrap();

        assert_eq!(
            report,
            ReviewReport::Unparsed {
                raw_text: "no json, no fences here".to_string()
            }
        );
        assert_eq!(report.exit_code(), FAILED);
        assert!(!output.exists());
        assert!(report.render().contains("RAW OUTPUT:\nno json, no fences here"));
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("app.py");
        let output = tmp.path().join("out.py");
        std::fs::write(&input, "x = 1").unwrap();

        let model = MockModel::failing(500);
        let err = execute(&model, &input, &output, "python")
            .await
            .expect_err("model error must abort the run");

        assert!(format!("{:?}", err).contains("status 500"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn transport_failure_aborts_run() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("app.py");
        let output = tmp.path().join("out.py");
        std::fs::write(&input, "x = 1").unwrap();

        let model = MockModel::timing_out();
        let err = execute(&model, &input, &output, "python")
            .await
            .expect_err("timeout must abort the run");

        let client_err = err.downcast_ref::<ClientError>().expect("client error kept");
        assert!(client_err.is_transport());
        assert_eq!(model.calls(), 1);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn prompt_uses_interpreter_language() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("main.rs");
        let output = tmp.path().join("out.rs");
        std::fs::write(&input, "fn main() {}").unwrap();

        let model = MockModel::replying("```python\nprint(1)\n```\n```rust\nfn main() {}\n```");
        let report = execute(&model, &input, &output, "rust").await.unwrap();

        assert!(matches!(report, ReviewReport::CodeBlock { .. }));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "fn main() {}");
        let seen = model.seen.lock().unwrap();
        assert!(seen[0][0].content.contains("```rust ... ```"));
    }

    #[test]
    fn code_block_hint_runs_written_file() {
        let report = ReviewReport::CodeBlock {
            output: PathBuf::from("/work/improved_app.py"),
        };
        let text = report.render();
        assert!(text.contains("Next:\n  python /work/improved_app.py\n"));
        assert!(!text.contains("refine serve"));

        let other = ReviewReport::CodeBlock {
            output: PathBuf::from("/work/improved.rs"),
        }
        .render();
        assert!(other.contains("  run /work/improved.rs\n"));
        assert!(!other.contains("open:"));
    }

    #[test]
    fn input_missing_message() {
        let report = ReviewReport::InputMissing {
            input: PathBuf::from("original_app.py"),
        };
        assert_eq!(
            report.render(),
            "original_app.py not found in this folder.\nCreate original_app.py first.\n"
        );
    }
}
