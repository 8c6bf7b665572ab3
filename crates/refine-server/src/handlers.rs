use axum::{
    extract::RawQuery,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::panic::{self, UnwindSafe};

use refine_core::{greeting, validate_name, Validation, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

/// `GET /?name=...`
///
/// The query is read raw so a malformed or missing query string is just "no
/// name" rather than an extractor rejection. Repeated `name` keys: first wins.
pub async fn greet(RawQuery(query): RawQuery) -> Response {
    let name = query.as_deref().and_then(name_param);
    guarded(|| validate_name(name.as_deref()))
}

/// Run the check, turning a panic inside it into a 500.
pub(crate) fn guarded<F>(check: F) -> Response
where
    F: FnOnce() -> Result<Validation, ValidationError> + UnwindSafe,
{
    match panic::catch_unwind(check) {
        Ok(result) => respond(result),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "name validation panicked".to_string());
            error!(error = %message, "name validation panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

fn name_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.into_owned())
}

pub(crate) fn respond(result: Result<Validation, ValidationError>) -> Response {
    match result {
        Ok(Validation::Accepted(name)) => (
            StatusCode::OK,
            Json(Greeting {
                message: greeting(&name),
            }),
        )
            .into_response(),
        Ok(Validation::Rejected(rejection)) => {
            debug!(reason = %rejection, "greeting rejected");
            (StatusCode::BAD_REQUEST, rejection.reason()).into_response()
        }
        // Last-resort guard: the check itself failed.
        Err(e) => {
            error!(error = %e, "name validation failed unexpectedly");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
