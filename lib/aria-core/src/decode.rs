//! Response classification and typed decoding.
//!
//! Two tightly coupled entry points:
//!
//! - [`resolve_error_shape`] classifies a response against the closed set of
//!   error bodies the service is known to return, without knowing anything
//!   about the expected success type.
//! - [`decode`] parses a response as a caller-chosen type and falls back to
//!   [`resolve_error_shape`] when that fails.
//!
//! Both are synchronous and pure: they operate on already-materialized bytes,
//! perform no I/O, and keep no state across calls.

use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{error, trace, warn};

use crate::{DecodeDiagnostic, Error, ErrorShape, Response, from_json, header};

/// Statuses whose responses are expected to carry a structured error body.
///
/// A response with one of these statuses that matches no known error shape
/// means the service violated its error-body contract.
const EXPECT_ERROR_BODY_STATUSES: [u16; 6] = [401, 403, 404, 500, 502, 503];

// ============================================================================
// Wire Shapes
// ============================================================================
// Externally dictated formats. Field layout must track what the service
// actually emits; drift here is an integration break, not a design choice.

#[derive(Debug, Deserialize)]
struct AuthenticationBody {
    error: String,
    error_description: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    #[serde(deserialize_with = "int_or_string")]
    status: u16,
    message: String,
    #[serde(default)]
    reason: Option<String>,
}

/// Some deployments report `status` as a JSON number, others as a string.
fn int_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u16),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(status) => Ok(status),
        Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Error-Shape Resolver
// ============================================================================

/// Classify a response as one of the known error shapes.
///
/// Matchers run in strict order and short-circuit on the first hit:
///
/// 1. Status 429 resolves to [`ErrorShape::RateLimited`] without any JSON
///    parsing; the status alone is authoritative. The `Retry-After` header is
///    read case-insensitively and carried along when it parses as a
///    non-negative integer; a missing or unparseable header is logged as an
///    anomaly but never blocks classification.
/// 2. The authentication-error body. A structurally matching body is accepted
///    whatever the status code says, even 2xx: some deployments pair error
///    bodies with misleading statuses. This follows the service's observed
///    behavior; integrators who would rather trust the status must gate on
///    [`Response::is_success`] before resolving.
/// 3. The generic API-error envelope. Tried after the authentication shape,
///    which is the more specific match.
///
/// `None` means nothing matched. That is not itself an error: it tells the
/// caller to try something else.
#[must_use]
pub fn resolve_error_shape(response: &Response<Bytes>) -> Option<ErrorShape> {
    if response.status() == 429 {
        let raw = response.header(header::RETRY_AFTER.as_str());
        let retry_after = raw.and_then(|value| value.trim().parse::<u64>().ok());
        if retry_after.is_none() {
            warn!(
                retry_after = ?raw,
                "429 response without a parseable Retry-After header"
            );
        }
        return Some(ErrorShape::RateLimited { retry_after });
    }

    if let Ok(body) = from_json::<AuthenticationBody>(response.body()) {
        return Some(ErrorShape::Authentication {
            error: body.error,
            description: body.error_description,
        });
    }

    if let Ok(body) = from_json::<ApiErrorBody>(response.body()) {
        return Some(ErrorShape::Api {
            status: body.error.status,
            message: body.error.message,
            reason: body.error.reason,
        });
    }

    None
}

// ============================================================================
// Typed Decoder
// ============================================================================

/// Decode a response as `T`, falling back to the known error shapes.
///
/// The expected shape is tried first and wins outright: a body that parses as
/// `T` is a success even if it would also structurally match an error shape,
/// because the expected shape is the caller's ground truth. Only on failure
/// is the response handed to [`resolve_error_shape`]; when that also comes up
/// empty, the result is a [`DecodeDiagnostic`] carrying the raw body, the
/// status, and the parse failure from the expected-shape attempt.
///
/// Logging here is advisory and never changes the outcome.
///
/// # Errors
///
/// Returns [`Error::Service`] when the response matches a known error shape,
/// or [`Error::Decoding`] when nothing matched.
pub fn decode<T: DeserializeOwned>(response: &Response<Bytes>) -> crate::Result<T> {
    let parse_error = match from_json::<T>(response.body()) {
        Ok(value) => {
            trace!(
                expected = std::any::type_name::<T>(),
                "decoded response as expected shape"
            );
            return Ok(value);
        }
        Err(error) => error,
    };

    if let Some(shape) = resolve_error_shape(response) {
        trace!(%shape, "response resolved to a known error shape");
        return Err(Error::Service(shape));
    }

    let status = response.status();
    let diagnostic = DecodeDiagnostic {
        body: response.body().clone(),
        expected: std::any::type_name::<T>(),
        status,
        source: parse_error,
    };

    if EXPECT_ERROR_BODY_STATUSES.contains(&status) {
        error!(
            status,
            expected = diagnostic.expected,
            error = %diagnostic.source,
            "error-status response carried no recognizable error body"
        );
    }

    Err(Error::Decoding(diagnostic))
}
