// src/error.rs
//! Application error types.
//!
//! Three failure families matter to callers: the remote store could not be
//! queried, a query legitimately found nothing, and a single item could not
//! be projected. Only the first is an error value that crosses the public
//! API; "nothing found" is `Ok(None)` and malformed items are skipped.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether the integration token was rejected or lacks access.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::RestrictedResource)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// Transport failure, including request timeouts.
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Malformed item {id}: {reason}")]
    MalformedItem { id: String, reason: String },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// True for failures of the remote query itself (transport, auth,
    /// quota, service errors, unreadable responses).
    pub fn is_remote_query_failure(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure(_) | Self::NotionService { .. } | Self::MalformedResponse(_)
        )
    }

    /// True when the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NetworkFailure(e) if e.is_timeout())
    }

    /// True when Notion rejected the token or it lacks access.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::NotionService { code, .. } if code.is_auth_failure())
    }

    /// What an operator should check first, for failures with a known cause.
    pub fn operator_hint(&self) -> Option<&'static str> {
        if self.is_auth_failure() {
            Some("check NOTION_TOKEN and that the integration is shared with the blog database")
        } else if self.is_timeout() {
            Some("Notion did not answer in time; retry or raise --timeout-secs")
        } else {
            None
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in [
            "rate_limited",
            "object_not_found",
            "unauthorized",
            "restricted_resource",
            "validation_error",
            "internal_server_error",
            "service_unavailable",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new"),
            NotionErrorCode::Unknown("brand_new".to_string())
        );
        assert_eq!(NotionErrorCode::from_http_status(502).to_string(), "http_502");
    }

    #[test]
    fn auth_failures_get_a_token_hint() {
        assert!(NotionErrorCode::Unauthorized.is_auth_failure());
        assert!(NotionErrorCode::RestrictedResource.is_auth_failure());
        assert!(!NotionErrorCode::RateLimited.is_auth_failure());

        let rejected = AppError::NotionService {
            code: NotionErrorCode::RestrictedResource,
            message: "Insufficient permissions".to_string(),
            status: 403,
        };
        assert!(rejected.is_auth_failure());
        assert!(rejected
            .operator_hint()
            .is_some_and(|hint| hint.contains("NOTION_TOKEN")));

        let throttled = AppError::NotionService {
            code: NotionErrorCode::RateLimited,
            message: "Slow down".to_string(),
            status: 429,
        };
        assert!(!throttled.is_auth_failure());
        assert_eq!(throttled.operator_hint(), None);
        assert_eq!(
            AppError::MalformedResponse("truncated".to_string()).operator_hint(),
            None
        );
    }

    #[tokio::test]
    async fn timeouts_get_a_timeout_hint() {
        // a listener that accepts and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        });

        let err = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap()
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();
        let err = AppError::from(err);
        server.abort();

        assert!(err.is_timeout());
        assert!(!err.is_auth_failure());
        assert!(err
            .operator_hint()
            .is_some_and(|hint| hint.contains("--timeout-secs")));
    }

    #[test]
    fn remote_failures_are_distinguished_from_item_failures() {
        let service = AppError::NotionService {
            code: NotionErrorCode::Unauthorized,
            message: "API token is invalid.".to_string(),
            status: 401,
        };
        assert!(service.is_remote_query_failure());
        assert!(!service.is_timeout());

        let item = AppError::MalformedItem {
            id: "p1".to_string(),
            reason: "missing properties".to_string(),
        };
        assert!(!item.is_remote_query_failure());
        assert_eq!(item.to_string(), "Malformed item p1: missing properties");
    }
}
