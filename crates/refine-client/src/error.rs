//! Error types for the model client.

/// Model client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("model request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete in time.
    #[error("model request timed out: {message}")]
    Timeout { message: String },

    /// Connection or transport failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// 2xx response that does not carry the expected reply.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Unusable client configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ClientError {
    /// True for failures that happened before any HTTP status was seen.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_status_and_body() {
        let err = ClientError::Status {
            status: 503,
            body: "model loading".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "model request failed with status 503: model loading"
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn transport_classification() {
        assert!(ClientError::Network {
            message: "refused".into()
        }
        .is_transport());
        assert!(ClientError::Timeout {
            message: "600s".into()
        }
        .is_transport());
        assert!(!ClientError::InvalidResponse {
            message: "x".into()
        }
        .is_transport());
    }
}
