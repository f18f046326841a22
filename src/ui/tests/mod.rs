//! UI module tests
//!
//! - Controller tests (worker round trips against a mock server)
