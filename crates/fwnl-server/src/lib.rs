//! FWNL HTTP server — library crate.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `fwnl-e2e-tests`) can reach `AppState`, `build_router` and the
//! config loader.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
