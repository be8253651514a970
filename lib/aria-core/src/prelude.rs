//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use aria_core::prelude::*;
//! ```

pub use crate::{
    DecodeDiagnostic, Error, ErrorShape, JsonError, Response, Result, decode, from_json,
    resolve_error_shape,
};
