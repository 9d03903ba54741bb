//! Product File Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::files::FilesServiceError;

pub(crate) fn into_status_error(error: FilesServiceError) -> StatusError {
    match error {
        FilesServiceError::NotFound => StatusError::not_found()
            .brief("Product or file not found")
            .detail("file_not_found"),
        FilesServiceError::NotPurchased => StatusError::forbidden()
            .brief("Product has not been purchased")
            .detail("not_purchased"),
        FilesServiceError::AlreadyExists => StatusError::conflict()
            .brief("File already exists")
            .detail("already_exists"),
        FilesServiceError::Validation(source) => StatusError::bad_request()
            .brief(source.to_string())
            .detail("invalid_file"),
        FilesServiceError::InvalidReference
        | FilesServiceError::MissingRequiredData
        | FilesServiceError::InvalidData => StatusError::bad_request()
            .brief("Invalid file payload")
            .detail("invalid_file"),
        FilesServiceError::Sql(source) => {
            error!("file storage error: {source}");

            StatusError::internal_server_error().detail("internal_error")
        }
    }
}
