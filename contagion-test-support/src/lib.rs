//! Shared test utilities used across contagion crates.

pub mod datasets;
pub mod profile;
pub mod tracing;
