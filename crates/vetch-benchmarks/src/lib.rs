//! Vetch benchmarking suite
//!
//! Benchmarks for the hot paths of an analysis run: requirement parsing,
//! transitive flattening, cycle detection and conflict detection over
//! synthetic environments.

pub mod common;

pub use common::*;
