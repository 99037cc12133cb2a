//! Property-based tests for ESD DAO holder aggregation
//!
//! Exercises the pure rules in `esd-dao-core` (holder discovery, status
//! decoding, bonded totals) with generated inputs, without a node.
//!
//! # Usage
//!
//! ```bash
//! # Run all property-based tests
//! cargo test --release -p esd-dao-fuzz
//!
//! # Run the fuzz test runner
//! cargo run --release -p esd-dao-fuzz
//!
//! # Run with more iterations
//! PROPTEST_CASES=10000 cargo test --release -p esd-dao-fuzz
//! ```

pub mod arbitrary;
pub mod invariants;
pub mod scenarios;

pub use arbitrary::*;
pub use invariants::*;
pub use scenarios::*;

// Include fuzz targets as test modules
#[cfg(test)]
#[path = "../fuzz_targets/holder_discovery.rs"]
mod holder_discovery_tests;

#[cfg(test)]
#[path = "../fuzz_targets/status_decode.rs"]
mod status_decode_tests;

#[cfg(test)]
#[path = "../fuzz_targets/bonded_totals.rs"]
mod bonded_totals_tests;
