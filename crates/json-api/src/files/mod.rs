//! Product Files

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod errors;
pub(crate) mod index;
pub(crate) mod purchased;
pub(crate) mod responses;
