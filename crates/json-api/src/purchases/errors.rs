//! Purchase Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::purchases::PurchasesServiceError;

pub(crate) fn into_status_error(error: PurchasesServiceError) -> StatusError {
    match error {
        PurchasesServiceError::NotFound => StatusError::not_found()
            .brief("Purchase not found")
            .detail("purchase_not_found"),
        PurchasesServiceError::AlreadyExists => StatusError::conflict()
            .brief("Product already purchased")
            .detail("already_purchased"),
        PurchasesServiceError::InvalidReference
        | PurchasesServiceError::MissingRequiredData
        | PurchasesServiceError::InvalidData
        | PurchasesServiceError::Sql(_) => {
            error!("purchase storage error: {error}");

            StatusError::internal_server_error().detail("internal_error")
        }
    }
}
