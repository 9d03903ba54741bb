//! Payment Webhooks

pub(crate) mod payments;
