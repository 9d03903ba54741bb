//! Checkout initiation.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::{
        checkout::errors::CheckoutError,
        fees::FeeSplit,
        products::{ProductsService, ProductsServiceError, records::ProductUuid},
        profiles::{ProfilesService, ProfilesServiceError, records::ProfileUuid},
        purchases::PurchasesService,
    },
    payments::{CheckoutMetadata, CheckoutSessionRequest, PaymentProvider},
    urls::AppUrls,
};

/// Where to send the buyer to pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub url: String,
}

pub struct HostedCheckoutService {
    products: Arc<dyn ProductsService>,
    profiles: Arc<dyn ProfilesService>,
    purchases: Arc<dyn PurchasesService>,
    payments: Arc<dyn PaymentProvider>,
    urls: AppUrls,
}

impl fmt::Debug for HostedCheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedCheckoutService")
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

impl HostedCheckoutService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        profiles: Arc<dyn ProfilesService>,
        purchases: Arc<dyn PurchasesService>,
        payments: Arc<dyn PaymentProvider>,
        urls: AppUrls,
    ) -> Self {
        Self {
            products,
            profiles,
            purchases,
            payments,
            urls,
        }
    }
}

#[async_trait]
impl CheckoutService for HostedCheckoutService {
    async fn start_checkout(
        &self,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<CheckoutRedirect, CheckoutError> {
        let product = match self.products.get_published_product(product).await {
            Ok(product) => product,
            Err(ProductsServiceError::NotFound) => return Err(CheckoutError::ProductNotFound),
            Err(error) => return Err(CheckoutError::Products(error)),
        };

        if self
            .purchases
            .find_purchase(buyer, product.uuid)
            .await?
            .is_some()
        {
            return Err(CheckoutError::AlreadyPurchased);
        }

        let buyer = match self.profiles.get_profile(buyer).await {
            Ok(profile) => profile,
            Err(ProfilesServiceError::NotFound) => return Err(CheckoutError::NotAuthenticated),
            Err(error) => return Err(CheckoutError::Profiles(error)),
        };

        let seller = match self.profiles.get_profile(product.seller_uuid).await {
            Ok(profile) => profile,
            Err(ProfilesServiceError::NotFound) => return Err(CheckoutError::SellerNotOnboarded),
            Err(error) => return Err(CheckoutError::Profiles(error)),
        };

        let Some(destination_account) = seller.payout_account() else {
            warn!(seller = %seller.uuid, product = %product.uuid, "seller cannot receive payouts");

            return Err(CheckoutError::SellerNotOnboarded);
        };

        let split = FeeSplit::for_tier(product.price, seller.seller_tier);

        let session = self
            .payments
            .create_checkout_session(CheckoutSessionRequest {
                customer_email: buyer.email,
                product_name: product.title,
                product_description: product.short_description,
                unit_amount: product.price,
                currency: product.currency,
                application_fee: split.platform_fee(),
                destination_account: destination_account.to_string(),
                success_url: self.urls.checkout_success(),
                cancel_url: self.urls.product_page(&product.slug),
                metadata: CheckoutMetadata {
                    product: product.uuid,
                    buyer: buyer.uuid,
                    seller: seller.uuid,
                    platform_fee: split.platform_fee(),
                },
            })
            .await
            .map_err(CheckoutError::PaymentProvider)?;

        info!(
            session = %session.id,
            product = %product.uuid,
            buyer = %buyer.uuid,
            platform_fee = split.platform_fee(),
            "checkout session created"
        );

        Ok(CheckoutRedirect { url: session.url })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Check the buyer may purchase `product` and open a hosted checkout for it.
    ///
    /// Nothing is persisted here; the purchase is recorded when the provider
    /// confirms payment.
    async fn start_checkout(
        &self,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<CheckoutRedirect, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{MockProductsService, records::ProductStatus},
            profiles::{MockProfilesService, records::SellerTier},
            purchases::{
                MockPurchasesService,
                records::{PurchaseRecord, PurchaseUuid},
            },
        },
        payments::{CheckoutSession, MockPaymentProvider, PaymentsError},
        test::fixtures::{product_record, profile_record},
    };

    use super::*;

    struct Mocks {
        products: MockProductsService,
        profiles: MockProfilesService,
        purchases: MockPurchasesService,
        payments: MockPaymentProvider,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                products: MockProductsService::new(),
                profiles: MockProfilesService::new(),
                purchases: MockPurchasesService::new(),
                payments: MockPaymentProvider::new(),
            }
        }

        fn into_service(self) -> HostedCheckoutService {
            HostedCheckoutService::new(
                Arc::new(self.products),
                Arc::new(self.profiles),
                Arc::new(self.purchases),
                Arc::new(self.payments),
                AppUrls::new("https://bazaar.test"),
            )
        }
    }

    #[test]
    fn debug_output_names_the_service() {
        let debug = format!("{:?}", Mocks::new().into_service());

        assert!(debug.starts_with("HostedCheckoutService"), "{debug}");
        assert!(debug.contains("bazaar.test"), "{debug}");
    }

    /// Mocks for a published product whose seller has finished onboarding.
    fn ready_to_buy(tier: SellerTier, price: u64) -> (Mocks, ProfileUuid, ProductUuid) {
        let mut mocks = Mocks::new();

        let mut seller = profile_record(tier);
        seller.payment_account = Some("acct_seller".to_string());
        seller.payment_onboarding_complete = true;

        let buyer = profile_record(SellerTier::Free);
        let product = product_record(seller.uuid, ProductStatus::Published, price);

        let (buyer_uuid, product_uuid, seller_uuid) = (buyer.uuid, product.uuid, seller.uuid);

        mocks
            .products
            .expect_get_published_product()
            .with(eq(product_uuid))
            .returning(move |_| Ok(product.clone()));

        mocks
            .purchases
            .expect_find_purchase()
            .returning(|_, _| Ok(None));

        mocks
            .profiles
            .expect_get_profile()
            .with(eq(buyer_uuid))
            .returning(move |_| Ok(buyer.clone()));

        mocks
            .profiles
            .expect_get_profile()
            .with(eq(seller_uuid))
            .returning(move |_| Ok(seller.clone()));

        (mocks, buyer_uuid, product_uuid)
    }

    #[tokio::test]
    async fn start_checkout_requests_session_with_tier_fee() -> TestResult {
        let (mut mocks, buyer, product) = ready_to_buy(SellerTier::Free, 2900);

        mocks
            .payments
            .expect_create_checkout_session()
            .withf(move |request| {
                request.unit_amount == 2900
                    && request.application_fee == 580
                    && request.metadata.platform_fee == 580
                    && request.metadata.buyer == buyer
                    && request.metadata.product == product
                    && request.destination_account == "acct_seller"
                    && request.success_url == "https://bazaar.test/account/purchases?success=true"
                    && request.cancel_url.starts_with("https://bazaar.test/product/")
            })
            .times(1)
            .returning(|_| {
                Ok(CheckoutSession {
                    id: "cs_1".to_string(),
                    url: "https://pay.test/cs_1".to_string(),
                })
            });

        let redirect = mocks.into_service().start_checkout(buyer, product).await?;

        assert_eq!(redirect.url, "https://pay.test/cs_1");

        Ok(())
    }

    #[tokio::test]
    async fn team_tier_pays_lower_fee() -> TestResult {
        let (mut mocks, buyer, product) = ready_to_buy(SellerTier::Team, 2900);

        mocks
            .payments
            .expect_create_checkout_session()
            .withf(|request| request.application_fee == 232)
            .times(1)
            .returning(|_| {
                Ok(CheckoutSession {
                    id: "cs_2".to_string(),
                    url: "https://pay.test/cs_2".to_string(),
                })
            });

        mocks.into_service().start_checkout(buyer, product).await?;

        Ok(())
    }

    #[tokio::test]
    async fn unpublished_product_is_not_found() {
        let mut mocks = Mocks::new();

        mocks
            .products
            .expect_get_published_product()
            .returning(|_| Err(ProductsServiceError::NotFound));

        mocks.payments.expect_create_checkout_session().never();

        let result = mocks
            .into_service()
            .start_checkout(ProfileUuid::new(), ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(CheckoutError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn existing_purchase_is_rejected() {
        let mut mocks = Mocks::new();
        let seller = profile_record(SellerTier::Free);
        let product = product_record(seller.uuid, ProductStatus::Published, 2900);
        let buyer = ProfileUuid::new();
        let existing = PurchaseRecord {
            uuid: PurchaseUuid::new(),
            buyer_uuid: buyer,
            product_uuid: product.uuid,
            amount: 2900,
            platform_fee: 580,
            seller_payout: 2320,
            payment_reference: "pi_old".to_string(),
            created_at: jiff::Timestamp::now(),
        };
        let product_uuid = product.uuid;

        mocks
            .products
            .expect_get_published_product()
            .returning(move |_| Ok(product.clone()));

        mocks
            .purchases
            .expect_find_purchase()
            .with(eq(buyer), eq(product_uuid))
            .returning(move |_, _| Ok(Some(existing.clone())));

        mocks.payments.expect_create_checkout_session().never();

        let result = mocks.into_service().start_checkout(buyer, product_uuid).await;

        assert!(
            matches!(result, Err(CheckoutError::AlreadyPurchased)),
            "expected AlreadyPurchased, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_buyer_is_not_authenticated() {
        let mut mocks = Mocks::new();
        let seller = profile_record(SellerTier::Free);
        let product = product_record(seller.uuid, ProductStatus::Published, 2900);
        let product_uuid = product.uuid;

        mocks
            .products
            .expect_get_published_product()
            .returning(move |_| Ok(product.clone()));

        mocks
            .purchases
            .expect_find_purchase()
            .returning(|_, _| Ok(None));

        mocks
            .profiles
            .expect_get_profile()
            .returning(|_| Err(ProfilesServiceError::NotFound));

        let result = mocks
            .into_service()
            .start_checkout(ProfileUuid::new(), product_uuid)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::NotAuthenticated)),
            "expected NotAuthenticated, got {result:?}"
        );
    }

    #[tokio::test]
    async fn seller_without_completed_onboarding_is_rejected() {
        let mut mocks = Mocks::new();

        let mut seller = profile_record(SellerTier::Pro);
        // Account linked but onboarding never confirmed.
        seller.payment_account = Some("acct_pending".to_string());

        let buyer = profile_record(SellerTier::Free);
        let product = product_record(seller.uuid, ProductStatus::Published, 2900);
        let (buyer_uuid, product_uuid, seller_uuid) = (buyer.uuid, product.uuid, seller.uuid);

        mocks
            .products
            .expect_get_published_product()
            .returning(move |_| Ok(product.clone()));

        mocks
            .purchases
            .expect_find_purchase()
            .returning(|_, _| Ok(None));

        mocks
            .profiles
            .expect_get_profile()
            .with(eq(buyer_uuid))
            .returning(move |_| Ok(buyer.clone()));

        mocks
            .profiles
            .expect_get_profile()
            .with(eq(seller_uuid))
            .returning(move |_| Ok(seller.clone()));

        mocks.payments.expect_create_checkout_session().never();

        let result = mocks
            .into_service()
            .start_checkout(buyer_uuid, product_uuid)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::SellerNotOnboarded)),
            "expected SellerNotOnboarded, got {result:?}"
        );
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let (mut mocks, buyer, product) = ready_to_buy(SellerTier::Free, 2900);

        mocks
            .payments
            .expect_create_checkout_session()
            .returning(|_| Err(PaymentsError::UnexpectedResponse("boom".to_string())));

        let result = mocks.into_service().start_checkout(buyer, product).await;

        let Err(error) = result else {
            panic!("expected PaymentProvider, got {result:?}");
        };

        assert!(matches!(error, CheckoutError::PaymentProvider(_)));
        assert_eq!(error.code(), "payment_provider_error");
    }
}
