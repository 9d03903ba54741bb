//! Checkout

mod errors;
pub(crate) mod create;
