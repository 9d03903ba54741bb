//! Public Product Handlers

pub(crate) mod by_slug;
pub(crate) mod get;
pub(crate) mod index;
