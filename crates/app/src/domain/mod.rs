//! Marketplace domain concerns

pub mod checkout;
pub mod fees;
pub mod files;
pub mod onboarding;
pub mod products;
pub mod profiles;
pub mod purchases;
pub mod webhooks;
