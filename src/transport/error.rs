use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const GENERIC_REASON: &str = "unknown error";

#[derive(Debug)]
pub enum TransportError {
    Http(reqwest::Error),
    Timeout,
    Api {
        status: StatusCode,
        error: ApiErrorBody,
    },
    Decode(serde_json::Error),
    Unreachable(String),
}

impl TransportError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(err)
        }
    }

    /// Builds the error for a non-2xx response. The body's `message` field is
    /// kept verbatim; anything else falls back to [`GENERIC_REASON`].
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let error = serde_json::from_slice::<ApiErrorBody>(body).unwrap_or_default();
        TransportError::Api { status, error }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Reason surfaced to the operator for a failed request.
    pub fn reason(&self) -> String {
        match self {
            TransportError::Api { error, .. } => error.message().to_string(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Http(err) => write!(f, "http error: {err}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Api { status, error } => {
                write!(f, "api error {status}: {}", error.message())
            }
            TransportError::Decode(err) => write!(f, "decode error: {err}"),
            TransportError::Unreachable(host) => write!(f, "service unreachable: {host}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(err) => Some(err),
            TransportError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

/// Error body the service sends with its aborts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn message(&self) -> &str {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m,
            _ => GENERIC_REASON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_surfaced_verbatim() {
        let err = TransportError::from_status(StatusCode::GATEWAY_TIMEOUT, br#"{"message":"timeout"}"#);
        assert_eq!(err.reason(), "timeout");
        assert_eq!(err.status(), Some(StatusCode::GATEWAY_TIMEOUT));
    }

    #[test]
    fn missing_message_falls_back_to_generic_reason() {
        let err = TransportError::from_status(StatusCode::NOT_FOUND, br#"{"status":404}"#);
        assert_eq!(err.reason(), GENERIC_REASON);
    }

    #[test]
    fn non_json_body_does_not_panic() {
        let err = TransportError::from_status(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err.reason(), GENERIC_REASON);
        assert_eq!(format!("{err}"), "api error 502 Bad Gateway: unknown error");
    }

    #[test]
    fn unreachable_reason_uses_display() {
        let err = TransportError::Unreachable("wish.test".into());
        assert_eq!(err.reason(), "service unreachable: wish.test");
    }
}
