//! Checkout errors.

use thiserror::Error;

use crate::{
    domain::{
        products::ProductsServiceError, profiles::ProfilesServiceError,
        purchases::PurchasesServiceError,
    },
    payments::PaymentsError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("buyer is not signed in")]
    NotAuthenticated,

    #[error("product not found")]
    ProductNotFound,

    #[error("product already purchased")]
    AlreadyPurchased,

    #[error("seller has not completed payment onboarding")]
    SellerNotOnboarded,

    #[error("payment provider error")]
    PaymentProvider(#[source] PaymentsError),

    #[error(transparent)]
    Products(ProductsServiceError),

    #[error(transparent)]
    Purchases(#[from] PurchasesServiceError),

    #[error(transparent)]
    Profiles(ProfilesServiceError),
}

impl CheckoutError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::ProductNotFound => "product_not_found",
            Self::AlreadyPurchased => "already_purchased",
            Self::SellerNotOnboarded => "seller_not_onboarded",
            Self::PaymentProvider(_) => "payment_provider_error",
            Self::Products(_) | Self::Purchases(_) | Self::Profiles(_) => "internal_error",
        }
    }
}
