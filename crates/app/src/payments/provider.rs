//! Payment provider port.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{products::records::ProductUuid, profiles::records::ProfileUuid},
    payments::errors::PaymentsError,
};

/// Identifiers attached to a checkout so its completion can be attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutMetadata {
    pub product: ProductUuid,
    pub buyer: ProfileUuid,
    pub seller: ProfileUuid,
    pub platform_fee: u64,
}

impl CheckoutMetadata {
    pub const PRODUCT_KEY: &str = "product_id";
    pub const BUYER_KEY: &str = "buyer_id";
    pub const SELLER_KEY: &str = "seller_id";
    pub const PLATFORM_FEE_KEY: &str = "platform_fee";

    /// Flattens the metadata into the string pairs the provider stores.
    #[must_use]
    pub fn to_pairs(&self) -> [(&'static str, String); 4] {
        [
            (Self::PRODUCT_KEY, self.product.to_string()),
            (Self::BUYER_KEY, self.buyer.to_string()),
            (Self::SELLER_KEY, self.seller.to_string()),
            (Self::PLATFORM_FEE_KEY, self.platform_fee.to_string()),
        ]
    }
}

/// A single-item hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub customer_email: String,
    pub product_name: String,
    pub product_description: Option<String>,
    pub unit_amount: u64,
    pub currency: String,
    pub application_fee: u64,
    pub destination_account: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: CheckoutMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccountRequest {
    pub email: String,
    pub profile: ProfileUuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedAccount {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingLinkRequest {
    pub account: String,
    pub refresh_url: String,
    pub return_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingLink {
    pub url: String,
}

/// Hosted payment processor operations.
///
/// Calls are not retried; a failure is reported to the caller as-is.
#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Start a hosted checkout that routes the payout to the seller's account.
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentsError>;

    /// Create an express connected account for a seller.
    async fn create_connected_account(
        &self,
        request: ConnectedAccountRequest,
    ) -> Result<ConnectedAccount, PaymentsError>;

    /// Create a single-use link into the provider's onboarding flow.
    async fn create_onboarding_link(
        &self,
        request: OnboardingLinkRequest,
    ) -> Result<OnboardingLink, PaymentsError>;
}
