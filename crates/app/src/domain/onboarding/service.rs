//! Seller payout onboarding.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::{
    domain::profiles::{ProfilesService, ProfilesServiceError, records::ProfileUuid},
    payments::{ConnectedAccountRequest, OnboardingLinkRequest, PaymentProvider, PaymentsError},
    urls::AppUrls,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingRedirect {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("seller profile not found")]
    NotAuthenticated,

    #[error("seller has already completed onboarding")]
    AlreadyOnboarded,

    #[error("payment provider error")]
    PaymentProvider(#[from] PaymentsError),

    #[error(transparent)]
    Profiles(ProfilesServiceError),
}

impl From<ProfilesServiceError> for OnboardingError {
    fn from(error: ProfilesServiceError) -> Self {
        match error {
            ProfilesServiceError::NotFound => Self::NotAuthenticated,
            other => Self::Profiles(other),
        }
    }
}

pub struct HostedOnboardingService {
    profiles: Arc<dyn ProfilesService>,
    payments: Arc<dyn PaymentProvider>,
    urls: AppUrls,
}

impl fmt::Debug for HostedOnboardingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedOnboardingService")
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

impl HostedOnboardingService {
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfilesService>,
        payments: Arc<dyn PaymentProvider>,
        urls: AppUrls,
    ) -> Self {
        Self {
            profiles,
            payments,
            urls,
        }
    }
}

#[async_trait]
impl OnboardingService for HostedOnboardingService {
    async fn start_onboarding(
        &self,
        seller: ProfileUuid,
    ) -> Result<OnboardingRedirect, OnboardingError> {
        let profile = self.profiles.get_profile(seller).await?;

        if profile.payment_onboarding_complete {
            return Err(OnboardingError::AlreadyOnboarded);
        }

        let account = match profile.payment_account {
            Some(account) => account,
            None => {
                let created = self
                    .payments
                    .create_connected_account(ConnectedAccountRequest {
                        email: profile.email,
                        profile: profile.uuid,
                    })
                    .await?;

                self.profiles
                    .set_payment_account(profile.uuid, created.id.clone())
                    .await?;

                info!(profile = %profile.uuid, account = %created.id, "connected account created");

                created.id
            }
        };

        let link = self
            .payments
            .create_onboarding_link(OnboardingLinkRequest {
                account,
                refresh_url: self.urls.seller_settings(),
                return_url: self.urls.seller_settings(),
            })
            .await?;

        Ok(OnboardingRedirect { url: link.url })
    }
}

#[automock]
#[async_trait]
pub trait OnboardingService: Send + Sync {
    /// Link the seller to the provider's onboarding flow, creating a connected
    /// account first if they have none.
    async fn start_onboarding(
        &self,
        seller: ProfileUuid,
    ) -> Result<OnboardingRedirect, OnboardingError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::profiles::{MockProfilesService, records::SellerTier},
        payments::{ConnectedAccount, MockPaymentProvider, OnboardingLink},
        test::fixtures::profile_record,
    };

    use super::*;

    fn service(profiles: MockProfilesService, payments: MockPaymentProvider) -> HostedOnboardingService {
        HostedOnboardingService::new(
            Arc::new(profiles),
            Arc::new(payments),
            AppUrls::new("https://bazaar.test"),
        )
    }

    #[test]
    fn debug_output_names_the_service() {
        let debug = format!(
            "{:?}",
            service(MockProfilesService::new(), MockPaymentProvider::new())
        );

        assert!(debug.starts_with("HostedOnboardingService"), "{debug}");
    }

    fn link_to_settings(payments: &mut MockPaymentProvider, account: &'static str) {
        payments
            .expect_create_onboarding_link()
            .withf(move |request| {
                request.account == account
                    && request.refresh_url == "https://bazaar.test/seller/settings"
                    && request.return_url == "https://bazaar.test/seller/settings"
            })
            .times(1)
            .returning(|_| {
                Ok(OnboardingLink {
                    url: "https://connect.test/onboard".to_string(),
                })
            });
    }

    #[tokio::test]
    async fn creates_and_stores_account_for_new_seller() -> TestResult {
        let mut profiles = MockProfilesService::new();
        let mut payments = MockPaymentProvider::new();
        let profile = profile_record(SellerTier::Free);
        let seller = profile.uuid;

        profiles
            .expect_get_profile()
            .with(eq(seller))
            .returning(move |_| Ok(profile.clone()));

        payments
            .expect_create_connected_account()
            .withf(move |request| request.profile == seller)
            .times(1)
            .returning(|_| {
                Ok(ConnectedAccount {
                    id: "acct_new".to_string(),
                })
            });

        profiles
            .expect_set_payment_account()
            .with(eq(seller), eq("acct_new".to_string()))
            .times(1)
            .returning(|uuid, account| {
                let mut profile = profile_record(SellerTier::Free);
                profile.uuid = uuid;
                profile.payment_account = Some(account);

                Ok(profile)
            });

        link_to_settings(&mut payments, "acct_new");

        let redirect = service(profiles, payments).start_onboarding(seller).await?;

        assert_eq!(redirect.url, "https://connect.test/onboard");

        Ok(())
    }

    #[tokio::test]
    async fn reuses_existing_account() -> TestResult {
        let mut profiles = MockProfilesService::new();
        let mut payments = MockPaymentProvider::new();
        let mut profile = profile_record(SellerTier::Pro);
        profile.payment_account = Some("acct_existing".to_string());
        let seller = profile.uuid;

        profiles
            .expect_get_profile()
            .returning(move |_| Ok(profile.clone()));

        payments.expect_create_connected_account().never();
        profiles.expect_set_payment_account().never();

        link_to_settings(&mut payments, "acct_existing");

        service(profiles, payments).start_onboarding(seller).await?;

        Ok(())
    }

    #[tokio::test]
    async fn onboarded_seller_is_rejected() {
        let mut profiles = MockProfilesService::new();
        let mut payments = MockPaymentProvider::new();
        let mut profile = profile_record(SellerTier::Pro);
        profile.payment_account = Some("acct_done".to_string());
        profile.payment_onboarding_complete = true;
        let seller = profile.uuid;

        profiles
            .expect_get_profile()
            .returning(move |_| Ok(profile.clone()));

        payments.expect_create_onboarding_link().never();

        let result = service(profiles, payments).start_onboarding(seller).await;

        assert!(
            matches!(result, Err(OnboardingError::AlreadyOnboarded)),
            "expected AlreadyOnboarded, got {result:?}"
        );
    }

    #[tokio::test]
    async fn missing_profile_is_not_authenticated() {
        let mut profiles = MockProfilesService::new();

        profiles
            .expect_get_profile()
            .returning(|_| Err(ProfilesServiceError::NotFound));

        let result = service(profiles, MockPaymentProvider::new())
            .start_onboarding(ProfileUuid::new())
            .await;

        assert!(
            matches!(result, Err(OnboardingError::NotAuthenticated)),
            "expected NotAuthenticated, got {result:?}"
        );
    }
}
