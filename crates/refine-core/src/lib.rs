//! Core logic for Refine.
//!
//! Two independent pieces live here, neither of which performs I/O:
//!
//! - [`validate`]: the greeting endpoint's name check (`Accepted` / `Rejected`).
//! - [`interpret`]: turns the free-form text a model returned into a code
//!   artifact, trying a structured JSON reply first, then a fenced code block,
//!   and finally handing the raw text back.
//!
//! [`prompt`] builds the chat messages sent to the model for a review, and
//! [`model`] holds the chat message types shared with the HTTP client.
//!
//! # Quick Start
//!
//! ```
//! use refine_core::{Interpreter, Outcome};
//!
//! let reply = "Here you go:\n```python\nprint(2)\n```";
//! let outcome = Interpreter::default().interpret(reply);
//! assert_eq!(outcome, Outcome::RawArtifact { code: "print(2)".to_string() });
//! ```

pub mod interpret;
pub mod model;
pub mod prompt;
pub mod validate;

pub use interpret::{fenced_blocks, interpret, FencedBlock, Interpreter, Outcome, DEFAULT_LANGUAGE};
pub use model::{ChatMessage, Role};
pub use prompt::ReviewPrompt;
pub use validate::{greeting, validate_name, Rejection, Validation, ValidationError, NAME_PATTERN};
