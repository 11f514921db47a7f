// src/domain/location.rs

use serde::{Deserialize, Serialize};

/// Device-reported position. Advisory input to the city-label lookup;
/// the production lookup keys on the caller's IP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
