//! Product file service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::files::data::FileValidationError;

#[derive(Debug, Error)]
pub enum FilesServiceError {
    #[error("file already exists")]
    AlreadyExists,

    #[error("product or file not found")]
    NotFound,

    /// The caller neither bought nor sells the product.
    #[error("product has not been purchased")]
    NotPurchased,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid file: {0}")]
    Validation(#[from] FileValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FilesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
