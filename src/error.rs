//! Error types returned by the mail.tm client.

use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;

/// Errors that can occur when talking to mail.tm.
///
/// Status-derived variants mirror the status codes documented by the API.
/// Precondition failures detected before a request is sent reuse
/// [`Error::MethodNotAllowed`] and [`Error::AccountTokenInvalid`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP 400: the payload is missing or incomplete.
    #[error("request payload is missing or incomplete")]
    MissingArgument,

    /// HTTP 401, or an operation that needs a token was called without one.
    #[error(
        "account token is missing or invalid; every request except POST /accounts and POST /token must carry a bearer token"
    )]
    AccountTokenInvalid,

    /// HTTP 404: the referenced account, domain, or message does not exist.
    #[error("the referenced account, domain, or message does not exist")]
    EntityNotFound,

    /// HTTP 405, or a verb the client does not issue.
    #[error("method is not allowed for this path")]
    MethodNotAllowed,

    /// HTTP 418.
    #[error("server refused to process the request")]
    RefusedToProcess,

    /// HTTP 422: the payload failed validation (short username, unknown domain, ...).
    #[error("request payload failed validation")]
    EntityNotProcessable,

    /// HTTP 429: more than 8 requests per second.
    #[error("rate limit exceeded (8 requests per second)")]
    Ratelimit,

    /// An id that cannot be sent as a single URL path segment. Raised before
    /// any request is made.
    #[error("invalid id {0:?}: must be a non-empty path segment other than `.` or `..`")]
    InvalidId(String),

    /// Any other non-200 status.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// Transport failure, timeout, or HTTP client construction failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// The bearer token cannot be used as an HTTP header value.
    #[error("token is not a valid header value: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),
}

impl Error {
    /// Map a response status onto an error.
    ///
    /// Returns `None` for `200 OK`, the only status treated as success.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        let err = match status.as_u16() {
            200 => return None,
            400 => Error::MissingArgument,
            401 => Error::AccountTokenInvalid,
            404 => Error::EntityNotFound,
            405 => Error::MethodNotAllowed,
            418 => Error::RefusedToProcess,
            422 => Error::EntityNotProcessable,
            429 => Error::Ratelimit,
            other => Error::UnexpectedStatus(other),
        };
        Some(err)
    }
}
