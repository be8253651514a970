//! JSON deserialization with path-aware errors.

use derive_more::{Display, Error};

/// Failure to deserialize a JSON payload.
///
/// Produced by [`from_json`]; when a response matches no known shape at all,
/// the failure from the expected-shape attempt is carried by
/// [`DecodeDiagnostic`](crate::DecodeDiagnostic) as its underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("JSON deserialization error at '{path}': {message}")]
pub struct JsonError {
    /// JSON path to the error (e.g., "album.artists[0].name").
    pub path: String,
    /// Error message from the deserializer.
    pub message: String,
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so failures report the exact path to the field
/// that failed to deserialize.
///
/// # Errors
///
/// Returns a [`JsonError`] if deserialization fails, with the path to the
/// problematic field (empty for syntax errors).
///
/// # Example
///
/// ```
/// use aria_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Artist { name: String }
///
/// let bytes = br#"{"name":"Nina Simone"}"#;
/// let artist: Artist = from_json(bytes).expect("deserialize");
/// assert_eq!(artist, Artist { name: "Nina Simone".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| JsonError {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}
