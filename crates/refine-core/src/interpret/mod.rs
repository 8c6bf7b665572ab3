//! Model reply interpretation.
//!
//! The model is asked for strict JSON but is not bound to it, so a reply is
//! tried against progressively weaker shapes and the first match wins:
//!
//! 1. a JSON object with `issues` and base64 `improved_code_b64` ([`structured`]),
//! 2. a fenced code block, preferring one tagged with the source language ([`fence`]),
//! 3. nothing matched: the raw text is handed back as [`Outcome::Unparsed`].
//!
//! A failed stage is never an error; it only moves on to the next one.
//! Interpretation is a pure function of the reply text.

mod fence;
mod structured;

use tracing::debug;

pub use fence::{fenced_blocks, FencedBlock};

/// Source language assumed when none is configured.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Result of interpreting one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The reply was the requested JSON document.
    StructuredArtifact { issues: Vec<String>, code: String },
    /// The reply carried a fenced code block instead.
    RawArtifact { code: String },
    /// Neither shape was found.
    Unparsed { raw_text: String },
}

impl Outcome {
    /// Code destined for the output file, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::StructuredArtifact { code, .. } | Self::RawArtifact { code } => Some(code),
            Self::Unparsed { .. } => None,
        }
    }

    pub fn is_artifact(&self) -> bool {
        self.code().is_some()
    }

    /// Short name of the stage that produced this outcome.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::StructuredArtifact { .. } => "structured",
            Self::RawArtifact { .. } => "fenced",
            Self::Unparsed { .. } => "unparsed",
        }
    }
}

/// Interprets model replies for one source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    language: String,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Interpreter {
    /// `language` is the fence tag preferred when looking for code blocks
    /// (compared case-insensitively).
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn interpret(&self, text: &str) -> Outcome {
        if let Some(reply) = structured::parse(text) {
            return Outcome::StructuredArtifact {
                issues: reply.issues,
                code: reply.code,
            };
        }
        debug!("reply is not a structured JSON document, looking for a code block");

        if let Some(code) = fence::extract_code(text, &self.language) {
            return Outcome::RawArtifact { code };
        }
        debug!(language = %self.language, "no usable code block in reply");

        Outcome::Unparsed {
            raw_text: text.to_string(),
        }
    }
}

/// Interpret a reply with the default language.
pub fn interpret(text: &str) -> Outcome {
    Interpreter::default().interpret(text)
}
