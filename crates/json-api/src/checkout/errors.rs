//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::checkout::CheckoutError;

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    let code = error.code();

    let status = match &error {
        CheckoutError::NotAuthenticated => {
            StatusError::unauthorized().brief("Sign in to purchase")
        }
        CheckoutError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CheckoutError::AlreadyPurchased => {
            StatusError::conflict().brief("You already own this product")
        }
        CheckoutError::SellerNotOnboarded => {
            StatusError::bad_request().brief("This seller cannot accept payments yet")
        }
        CheckoutError::PaymentProvider(_)
        | CheckoutError::Products(_)
        | CheckoutError::Purchases(_)
        | CheckoutError::Profiles(_) => {
            error!("failed to start checkout: {error}");

            StatusError::internal_server_error()
        }
    };

    status.detail(code)
}
