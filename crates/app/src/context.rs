//! App Context

use std::sync::Arc;

use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        checkout::{CheckoutService, HostedCheckoutService},
        files::{FilesService, PgFilesService},
        onboarding::{HostedOnboardingService, OnboardingService},
        products::{PgProductsService, ProductsService},
        profiles::{PgProfilesService, ProfilesService},
        purchases::{PgPurchasesService, PurchasesService},
        webhooks::{SignedWebhooksService, WebhooksService},
    },
    payments::{
        PaymentProvider, StripeClient, StripeConfig,
        signature::{SignatureError, SignatureVerifier},
    },
    urls::AppUrls,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid webhook secret")]
    WebhookSecret(#[source] SignatureError),
}

/// Settings needed to wire up every service.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub stripe: StripeConfig,
    pub webhook_secret: Zeroizing<String>,
    pub webhook_tolerance_seconds: u64,
    pub app_url: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub purchases: Arc<dyn PurchasesService>,
    pub files: Arc<dyn FilesService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub onboarding: Arc<dyn OnboardingService>,
    pub webhooks: Arc<dyn WebhooksService>,
    pub auth: Arc<dyn AuthService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the webhook secret is empty or establishing a
    /// database connection fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let verifier = SignatureVerifier::new(
            settings.webhook_secret.as_bytes(),
            settings.webhook_tolerance_seconds,
        )
        .map_err(AppInitError::WebhookSecret)?;

        let pool =
            database::connect_pool(&settings.database_url, settings.database_max_connections)
                .await
                .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));
        let profiles: Arc<dyn ProfilesService> = Arc::new(PgProfilesService::new(db.clone()));
        let purchases: Arc<dyn PurchasesService> = Arc::new(PgPurchasesService::new(db.clone()));
        let payments: Arc<dyn PaymentProvider> = Arc::new(StripeClient::new(settings.stripe));
        let urls = AppUrls::new(settings.app_url);

        Ok(Self {
            checkout: Arc::new(HostedCheckoutService::new(
                products.clone(),
                profiles.clone(),
                purchases.clone(),
                payments.clone(),
                urls.clone(),
            )),
            onboarding: Arc::new(HostedOnboardingService::new(profiles.clone(), payments, urls)),
            webhooks: Arc::new(SignedWebhooksService::new(
                verifier,
                products.clone(),
                profiles.clone(),
                purchases.clone(),
            )),
            files: Arc::new(PgFilesService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
            products,
            profiles,
            purchases,
        })
    }
}
