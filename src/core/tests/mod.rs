//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Type, parent and serde tests
//! - Catalog tree tests
//! - Formatting tests
//! - Validation and editor form tests

#[cfg(test)]
mod catalog_tests;
#[cfg(test)]
mod format_tests;
#[cfg(test)]
mod types_tests;
