//! Core types for the aria response-decoding layer.
//!
//! This crate provides the foundational pieces used by aria:
//! - [`Response`] - HTTP response type (status, headers, buffered body)
//! - [`ErrorShape`] - closed set of structured errors the service returns
//! - [`Error`] and [`Result`] - error handling
//! - [`DecodeDiagnostic`] - terminal "nothing matched" failure
//! - [`resolve_error_shape`] - error-shape classification
//! - [`decode`] - typed decoding with error-shape fallback
//! - [`from_json`] - path-aware JSON deserialization
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod decode;
mod error;
mod json;
pub mod prelude;
mod response;

pub use decode::{decode, resolve_error_shape};
pub use error::{DecodeDiagnostic, Error, ErrorShape, Result};
pub use json::{JsonError, from_json};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
