//! Benchmark support crate for kindling.
//!
//! Provides parameter labels and setup errors shared by the Criterion
//! benchmarks that time Forest Fire evolution.

pub mod error;
pub mod params;
