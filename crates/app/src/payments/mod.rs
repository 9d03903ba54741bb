//! Payment processor integration

pub mod client;
pub mod errors;
pub mod events;
pub mod provider;
pub mod signature;

pub use client::{StripeClient, StripeConfig};
pub use errors::PaymentsError;
pub use provider::*;
