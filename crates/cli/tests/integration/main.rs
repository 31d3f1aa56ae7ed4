//! CLI integration tests for binstubs.

mod common;

mod create_tests;
mod remotes_tests;
