//! Seller Onboarding

mod errors;
pub(crate) mod create;
