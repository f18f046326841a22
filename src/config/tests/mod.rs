//! Settings module tests
//!
//! - Layered loading (defaults, file, environment, legacy variables)
//! - Validation failures
//! - Atomic catalog export

#[cfg(test)]
mod export_tests;
#[cfg(test)]
mod loader_tests;
