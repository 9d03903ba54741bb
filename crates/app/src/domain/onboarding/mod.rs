//! Seller onboarding

pub mod service;

pub use service::*;
