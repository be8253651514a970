//! Error types for aria.

use bytes::Bytes;
use derive_more::{Display, Error, From};

use crate::JsonError;

// ============================================================================
// Service-Reported Error Shapes
// ============================================================================

/// Structured error bodies the service is known to return.
///
/// Classifying a response is a one-of-N structural match over this closed
/// set: exactly one variant, or none, results from a single response. The
/// wire formats are dictated by the service and must be matched as emitted.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ErrorShape {
    /// Authentication failed or the access token was rejected.
    #[display("authentication error '{error}': {description}")]
    Authentication {
        /// Machine-readable error code (e.g., `invalid_token`).
        error: String,
        /// Human-readable description.
        description: String,
    },

    /// Generic error envelope returned by most endpoints.
    #[display("API error {status}: {message}")]
    Api {
        /// Status code reported inside the body.
        status: u16,
        /// Human-readable message.
        message: String,
        /// Machine-readable reason, on the endpoints that provide one.
        reason: Option<String>,
    },

    /// The service throttled the request (HTTP 429).
    #[display(
        "rate limited: {}",
        retry_after.map_or_else(|| "no retry hint".to_string(), |secs| format!("retry after {secs}s"))
    )]
    RateLimited {
        /// Seconds to wait, taken from the `Retry-After` header when usable.
        ///
        /// Advisory only: the decoding layer reports it and the caller owns
        /// any retry decision.
        #[error(not(source))]
        retry_after: Option<u64>,
    },
}

impl ErrorShape {
    /// Advisory retry delay in seconds for rate-limited responses.
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            Self::Authentication { .. } | Self::Api { .. } => None,
        }
    }
}

// ============================================================================
// Decode Diagnostic
// ============================================================================

/// Terminal failure produced when a response matches neither the expected
/// shape nor any known error shape.
///
/// Carries the full context needed to debug the mismatch. `source` is always
/// the failure from parsing the body as the *expected* shape, never from one
/// of the error-shape probes: that first failure is the one that tells the
/// caller what was actually missing.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("could not decode response as {expected} (HTTP {status}): {source}")]
pub struct DecodeDiagnostic {
    /// Raw response body.
    pub body: Bytes,
    /// Name of the shape the caller expected.
    pub expected: &'static str,
    /// HTTP status code of the response.
    pub status: u16,
    /// Parse failure from the expected-shape attempt.
    pub source: JsonError,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for aria decode operations.
///
/// Every unmatched case surfaces as one of these; the decoding layer never
/// recovers locally, never retries, and raises no other error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum Error {
    /// Structured error reported by the service.
    #[display("{_0}")]
    Service(ErrorShape),

    /// No known shape matched the response.
    #[display("{_0}")]
    Decoding(DecodeDiagnostic),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the service reported an authentication error.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Service(ErrorShape::Authentication { .. }))
    }

    /// Returns `true` if the service rate-limited the request.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Service(ErrorShape::RateLimited { .. }))
    }

    /// Returns `true` if the response could not be decoded at all.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding(_))
    }

    /// Advisory retry delay in seconds, when the request was rate-limited.
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Service(shape) => shape.retry_after(),
            Self::Decoding(_) => None,
        }
    }

    /// Status code associated with the error, if any.
    ///
    /// For [`Error::Service`] this is the status the *body* reported; for
    /// [`Error::Decoding`] it is the HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Service(ErrorShape::Api { status, .. }) => Some(*status),
            Self::Service(_) => None,
            Self::Decoding(diagnostic) => Some(diagnostic.status),
        }
    }
}
