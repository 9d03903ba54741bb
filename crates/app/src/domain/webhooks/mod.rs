//! Payment webhooks

pub mod service;

pub use service::*;
