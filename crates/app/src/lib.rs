//! Marketplace domain services, persistence and payment-provider plumbing.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod payments;
pub mod urls;

#[cfg(test)]
mod test;

mod uuids;
