//! Typed response decoding for web API clients.
//!
//! aria turns the raw bytes and HTTP metadata of a completed round-trip into
//! either a strongly-typed value or a well-classified error, and exposes the
//! same algorithm as composable stream operators.
//!
//! # Example
//!
//! ```ignore
//! use aria::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Track {
//!     name: String,
//!     duration_ms: u64,
//! }
//!
//! // Single-shot: decode one completed response
//! let track: Track = aria::decode(&response)?;
//!
//! // Stream form: decode a sequence of responses, failing fast on the
//! // first rate limit or error body
//! let tracks = responses.decode_json::<Track>();
//! ```
//!
//! The decoding algorithm tries the expected shape first; on failure it
//! probes the closed set of error bodies the service is known to return
//! (authentication error, generic API error, the 429 + `Retry-After`
//! convention), and as a last resort reports a [`DecodeDiagnostic`] carrying
//! the original parse failure and full response context.

pub mod prelude;
pub mod stream;

pub use stream::{DecodeJson, FilterErrorShapes, ResponseStreamExt};

// Re-export core types
pub use aria_core::{
    DecodeDiagnostic, Error, ErrorShape, JsonError, Response, Result, decode, from_json,
    resolve_error_shape,
};

// Re-export http types for status codes and headers
pub use aria_core::{StatusCode, header};
