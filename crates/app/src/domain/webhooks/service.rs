//! Payment webhook processing.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    domain::{
        fees::FeeSplit,
        products::ProductsService,
        profiles::{ProfilesService, ProfilesServiceError},
        purchases::{PurchasesService, data::NewPurchase, records::PurchaseInsert},
    },
    payments::{
        events::{AccountStatus, CompletedCheckout, PaymentEvent},
        signature::{SignatureError, SignatureVerifier},
    },
};

/// What a delivery did. Every variant is acknowledged to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    PurchaseRecorded,
    PurchaseAlreadyRecorded,
    SellerOnboarded,
    SellerOnboardingIncomplete,
    Ignored,

    /// The delivery was authentic but could not be applied; it was logged and dropped.
    Discarded,
}

impl WebhookOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PurchaseRecorded => "purchase_recorded",
            Self::PurchaseAlreadyRecorded => "purchase_already_recorded",
            Self::SellerOnboarded => "seller_onboarded",
            Self::SellerOnboardingIncomplete => "seller_onboarding_incomplete",
            Self::Ignored => "ignored",
            Self::Discarded => "discarded",
        }
    }
}

impl fmt::Display for WebhookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook signature rejected: {0}")]
    Signature(#[from] SignatureError),
}

pub struct SignedWebhooksService {
    verifier: SignatureVerifier,
    products: Arc<dyn ProductsService>,
    profiles: Arc<dyn ProfilesService>,
    purchases: Arc<dyn PurchasesService>,
}

impl fmt::Debug for SignedWebhooksService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedWebhooksService")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

impl SignedWebhooksService {
    #[must_use]
    pub fn new(
        verifier: SignatureVerifier,
        products: Arc<dyn ProductsService>,
        profiles: Arc<dyn ProfilesService>,
        purchases: Arc<dyn PurchasesService>,
    ) -> Self {
        Self {
            verifier,
            products,
            profiles,
            purchases,
        }
    }

    async fn checkout_completed(&self, checkout: CompletedCheckout) -> WebhookOutcome {
        let metadata = checkout.metadata;

        let Some(split) = FeeSplit::from_platform_fee(checkout.amount_total, metadata.platform_fee)
        else {
            warn!(
                session = %checkout.session_id,
                amount = checkout.amount_total,
                platform_fee = metadata.platform_fee,
                "platform fee exceeds amount charged"
            );

            return WebhookOutcome::Discarded;
        };

        let purchase = NewPurchase::new(
            metadata.buyer,
            metadata.product,
            split,
            checkout.payment_reference(),
        );

        match self.purchases.record_purchase(purchase).await {
            Ok(PurchaseInsert::Created(record)) => {
                info!(
                    purchase = %record.uuid,
                    product = %record.product_uuid,
                    buyer = %record.buyer_uuid,
                    "purchase recorded"
                );

                // The purchase is already durable; a lost increment only under-counts.
                if let Err(error) = self
                    .products
                    .increment_purchase_count(record.product_uuid)
                    .await
                {
                    warn!(product = %record.product_uuid, %error, "failed to bump purchase count");
                }

                WebhookOutcome::PurchaseRecorded
            }
            Ok(PurchaseInsert::AlreadyRecorded) => {
                info!(
                    product = %metadata.product,
                    buyer = %metadata.buyer,
                    "purchase already recorded"
                );

                WebhookOutcome::PurchaseAlreadyRecorded
            }
            Err(error) => {
                error!(session = %checkout.session_id, %error, "failed to record purchase");

                WebhookOutcome::Discarded
            }
        }
    }

    async fn account_updated(&self, status: AccountStatus) -> WebhookOutcome {
        if !status.is_ready() {
            info!(
                account = %status.account,
                charges_enabled = status.charges_enabled,
                details_submitted = status.details_submitted,
                "account not ready for payouts"
            );

            return WebhookOutcome::SellerOnboardingIncomplete;
        }

        match self.profiles.mark_onboarding_complete(status.account.clone()).await {
            Ok(profile) => {
                info!(profile = %profile.uuid, account = %status.account, "seller onboarded");

                WebhookOutcome::SellerOnboarded
            }
            Err(ProfilesServiceError::NotFound) => {
                warn!(account = %status.account, "no profile owns account");

                WebhookOutcome::Discarded
            }
            Err(error) => {
                error!(account = %status.account, %error, "failed to mark onboarding complete");

                WebhookOutcome::Discarded
            }
        }
    }
}

#[async_trait]
impl WebhooksService for SignedWebhooksService {
    async fn handle_delivery(
        &self,
        payload: Vec<u8>,
        signature: Option<String>,
    ) -> Result<WebhookOutcome, WebhookError> {
        self.verifier.verify(&payload, signature.as_deref())?;

        let event = match PaymentEvent::from_slice(&payload) {
            Ok(event) => event,
            Err(error) => {
                warn!(%error, "unreadable webhook event");

                return Ok(WebhookOutcome::Discarded);
            }
        };

        let outcome = match event {
            PaymentEvent::CheckoutCompleted(checkout) => self.checkout_completed(checkout).await,
            PaymentEvent::AccountUpdated(status) => self.account_updated(status).await,
            PaymentEvent::Other(kind) => {
                info!(%kind, "ignoring webhook event");

                WebhookOutcome::Ignored
            }
        };

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
pub trait WebhooksService: Send + Sync {
    /// Verify and apply one webhook delivery.
    ///
    /// Only signature failures are errors. Anything that goes wrong after the
    /// delivery is authenticated is logged and reported as
    /// [`WebhookOutcome::Discarded`].
    async fn handle_delivery(
        &self,
        payload: Vec<u8>,
        signature: Option<String>,
    ) -> Result<WebhookOutcome, WebhookError>;
}
