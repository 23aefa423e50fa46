//! Translation of non-success responses
//!
//! Every non-success status outside the per-operation sentinels becomes an
//! [`ApiManagementError::RequestFailed`]. Translation itself never fails:
//! an unreadable or unrecognized body falls back to a message derived from
//! the status alone.

use apim_domain::{ApiManagementError, ErrorEnvelope, RequestFailure};
use hyper::ext::ReasonPhrase;
use reqwest::{Response, StatusCode};
use tracing::debug;

/// Turns failed responses into structured [`RequestFailure`]s.
pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Consume `response` and translate it.
    pub async fn from_response(response: Response) -> ApiManagementError {
        let status = response.status();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .map(str::to_string);
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(err) => {
                debug!(%status, error = %err, "failed to read error response body");
                Vec::new()
            }
        };

        let failure = Self::translate_with_reason(status, reason.as_deref(), &body);
        debug!(
            status = failure.status(),
            code = failure.code().unwrap_or_default(),
            "request failed"
        );
        ApiManagementError::RequestFailed(failure)
    }

    /// Translate a status and raw body.
    ///
    /// When `body` is a service error envelope the message becomes
    /// `{code}: {message}`; otherwise it is
    /// `HTTP-{status}: {StatusPhrase} ({reason})`.
    pub fn translate(status: StatusCode, body: &[u8]) -> RequestFailure {
        Self::translate_with_reason(status, None, body)
    }

    /// Like [`translate`](Self::translate), with the reason phrase the
    /// server actually sent; the canonical phrase is used when it is
    /// `None` or empty.
    pub fn translate_with_reason(
        status: StatusCode,
        reason: Option<&str>,
        body: &[u8],
    ) -> RequestFailure {
        let reason = reason
            .filter(|reason| !reason.trim().is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unknown Status");
        let failure = RequestFailure::new(status.as_u16(), status_phrase(status), reason);

        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => failure.with_error(envelope.error),
            Err(_) => failure,
        }
    }
}

/// Symbolic status name, e.g. `PreconditionFailed` for 412.
fn status_phrase(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_body_uses_status_message() {
        let failure = ErrorTranslator::translate(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(failure.message(), "HTTP-500: InternalServerError (Internal Server Error)");
        assert_eq!(failure.status(), 500);
        assert!(failure.error().is_none());
    }

    #[test]
    fn error_envelope_replaces_message() {
        let body = json!({
            "error": {
                "code": "ValidationError",
                "message": "One or more fields contain incorrect values:",
                "details": [
                    { "code": "ValidationError", "target": "email", "message": "Email is invalid" }
                ]
            }
        });
        let failure = ErrorTranslator::translate(
            StatusCode::BAD_REQUEST,
            body.to_string().as_bytes(),
        );

        assert_eq!(
            failure.message(),
            "ValidationError: One or more fields contain incorrect values:"
        );
        assert_eq!(failure.code(), Some("ValidationError"));
        assert_eq!(failure.details().len(), 1);
        assert_eq!(failure.details()[0].target.as_deref(), Some("email"));
        assert_eq!(failure.status_phrase(), "BadRequest");
    }

    #[test]
    fn unrecognized_body_falls_back_to_status() {
        for body in [&b"<html>oops</html>"[..], br#"{"message":"no envelope"}"#, b"{"] {
            let failure = ErrorTranslator::translate(StatusCode::CONFLICT, body);
            assert_eq!(failure.message(), "HTTP-409: Conflict (Conflict)");
            assert!(failure.is_conflict());
        }
    }

    #[test]
    fn precondition_failed_is_recognized() {
        let failure = ErrorTranslator::translate(StatusCode::PRECONDITION_FAILED, b"");
        assert!(failure.is_precondition_failed());
        assert_eq!(failure.status_phrase(), "PreconditionFailed");
    }

    #[test]
    fn unknown_status_uses_number() {
        let status = StatusCode::from_u16(599).unwrap();
        let failure = ErrorTranslator::translate(status, b"");
        assert_eq!(failure.message(), "HTTP-599: 599 (Unknown Status)");
    }

    #[test]
    fn server_reason_phrase_is_kept() {
        let failure = ErrorTranslator::translate_with_reason(
            StatusCode::SERVICE_UNAVAILABLE,
            Some("Service Is Being Upgraded"),
            b"",
        );
        assert_eq!(failure.message(), "HTTP-503: ServiceUnavailable (Service Is Being Upgraded)");
        assert_eq!(failure.reason_phrase(), "Service Is Being Upgraded");

        let blank = ErrorTranslator::translate_with_reason(StatusCode::NOT_FOUND, Some(" "), b"");
        assert_eq!(blank.message(), "HTTP-404: NotFound (Not Found)");
    }

    #[tokio::test]
    async fn reason_phrase_is_read_from_the_response() {
        let response = hyper::Response::builder()
            .status(StatusCode::BAD_GATEWAY)
            .extension(ReasonPhrase::from_static(b"Upstream Went Away"))
            .body("")
            .unwrap();

        let err = ErrorTranslator::from_response(Response::from(response)).await;
        assert_eq!(err.to_string(), "HTTP-502: BadGateway (Upstream Went Away)");
    }
}
