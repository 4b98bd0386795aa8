//! Tracing/logging initialization for hosts and tests.

pub mod tracing;

pub use tracing::init;
