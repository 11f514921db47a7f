// src/error/mod.rs
//
// Crate-wide error taxonomy.
//
// Zero matches from the cross-reference lookup is NOT an error; it is an
// `Ok(None)` at the gateway seam. `AppError` covers the failures that are:
// transport, malformed payloads, missing records, bad configuration.

pub mod types;

pub use types::{AppError, AppResult};
