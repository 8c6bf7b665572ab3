//! Structured reply: `{"issues": [...], "improved_code_b64": "..."}`.
//!
//! Strict decode, soft fallback: the payload must be canonical standard
//! base64 of valid UTF-8, and any failure along the way yields `None`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct WireReply {
    #[serde(default)]
    issues: Vec<Value>,
    improved_code_b64: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StructuredReply {
    pub issues: Vec<String>,
    pub code: String,
}

pub(crate) fn parse(text: &str) -> Option<StructuredReply> {
    // Only an object qualifies; serde would otherwise accept a positional array.
    let object: Map<String, Value> = match serde_json::from_str(text) {
        Ok(object) => object,
        Err(e) => {
            debug!(error = %e, "reply is not a JSON object");
            return None;
        }
    };

    let wire: WireReply = match serde_json::from_value(Value::Object(object)) {
        Ok(wire) => wire,
        Err(e) => {
            debug!(error = %e, "JSON reply has the wrong shape");
            return None;
        }
    };

    if wire.improved_code_b64.trim().is_empty() {
        debug!("JSON reply has an empty improved_code_b64");
        return None;
    }

    let code = decode_code(&wire.improved_code_b64)?;
    let issues = wire.issues.into_iter().map(render_issue).collect();

    Some(StructuredReply { issues, code })
}

fn decode_code(encoded: &str) -> Option<String> {
    // Models like to wrap long base64 lines.
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "improved_code_b64 is not valid base64");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(code) => Some(code),
        Err(e) => {
            debug!(error = %e, "improved_code_b64 does not decode to UTF-8");
            None
        }
    }
}

fn render_issue(issue: Value) -> String {
    match issue {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
