//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => StatusError::conflict()
            .brief("Product already exists")
            .detail("already_exists"),
        ProductsServiceError::NotFound => StatusError::not_found()
            .brief("Product not found")
            .detail("product_not_found"),
        ProductsServiceError::Validation(source) => StatusError::bad_request()
            .brief(source.to_string())
            .detail("invalid_product"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => StatusError::bad_request()
            .brief("Invalid product payload")
            .detail("invalid_product"),
        error @ ProductsServiceError::Locked(_) => StatusError::conflict()
            .brief(error.to_string())
            .detail("product_locked"),
        error @ ProductsServiceError::InvalidStatusTransition { .. } => StatusError::conflict()
            .brief(error.to_string())
            .detail("invalid_status_transition"),
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error().detail("internal_error")
        }
    }
}
