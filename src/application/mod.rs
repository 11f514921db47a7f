// src/application/mod.rs
//
// Application Layer - host boundary

pub mod state;

pub use state::AppState;
