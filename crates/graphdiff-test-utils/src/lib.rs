//! Testing utilities for graphdiff workspace
//!
//! Shared entity fixtures, a fluent mapping builder, and tracing setup.

#![allow(missing_docs)]

mod builder;
pub mod fixtures;

pub use builder::MappingBuilder;

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
