//! Greeting input validation.
//!
//! A name is accepted when it is present, non-empty, and made only of ASCII
//! letters and whitespace (anchored full match of [`NAME_PATTERN`]). Anything
//! else is rejected with a reason fit for a 400 response.
//!
//! [`ValidationError`] is the last-resort guard: it only surfaces when the
//! check itself cannot run, and callers map it to an internal error.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

/// Letters and whitespace only, at least one character.
pub const NAME_PATTERN: &str = r"^[a-zA-Z\s]+$";

lazy_static! {
    static ref NAME_RE: Result<Regex, regex::Error> = Regex::new(NAME_PATTERN);
}

/// Outcome of checking a greeting name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Holds the input unchanged; it always matches [`NAME_PATTERN`].
    Accepted(String),
    Rejected(Rejection),
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Why a name was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No `name` given, or given as an empty string.
    Missing,
    /// Contains something other than letters and whitespace.
    Invalid,
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "Name is required",
            Self::Invalid => {
                "Invalid input: 'name' must be a non-empty string with letters and spaces only."
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// The check could not be carried out at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("name pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

/// Check a greeting name taken from an optional query parameter.
pub fn validate_name(input: Option<&str>) -> Result<Validation, ValidationError> {
    let name = match input {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(Validation::Rejected(Rejection::Missing)),
    };

    let re = NAME_RE.as_ref().map_err(|e| ValidationError::Pattern(e.clone()))?;
    if re.is_match(name) {
        Ok(Validation::Accepted(name.to_string()))
    } else {
        Ok(Validation::Rejected(Rejection::Invalid))
    }
}

/// Greeting message for an accepted name.
pub fn greeting(name: &str) -> String {
    format!("Hello, {}!", name)
}
