//! Product Files
//!
//! Metadata for the deliverables attached to a listing. The bytes live in an
//! object store under [`records::ProductFileRecord::file_path`].

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::FilesServiceError;
pub use service::*;
