//! Benchmark support crate for contagion.
//!
//! Provides a seeded synthetic contact network and the parameter types used
//! by the Criterion benchmarks for loading, spread traversal, path tracing
//! and reproduction-number estimates.

pub mod contacts;
pub mod error;
pub mod params;
