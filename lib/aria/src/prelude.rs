//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and
//! traits for easy glob importing:
//!
//! ```ignore
//! use aria::prelude::*;
//! ```

pub use crate::{
    DecodeDiagnostic, Error, ErrorShape, JsonError, Response, ResponseStreamExt, Result,
    StatusCode, decode, from_json, header, resolve_error_shape,
};
pub use serde::Deserialize;
