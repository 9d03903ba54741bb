//! Shared test infrastructure

pub mod fixtures;

pub use context::TestContext;
