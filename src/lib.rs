// ABOUTME: Library root for gantry - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod daemon;
pub mod deploy;
pub mod error;
pub mod output;
pub mod query;
pub mod state;
pub mod types;
