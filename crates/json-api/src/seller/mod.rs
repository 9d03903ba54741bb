//! Seller Dashboard
//!
//! Every route here acts on the authenticated profile's own listings.

pub(crate) mod products;
pub(crate) mod stats;
