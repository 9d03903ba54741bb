//! Seller Product Handlers

pub(crate) mod archive;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
mod requests;
pub(crate) mod submit;
pub(crate) mod update;
