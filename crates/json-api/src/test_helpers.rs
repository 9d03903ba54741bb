//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bazaar_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        checkout::MockCheckoutService,
        files::{
            MockFilesService,
            records::{ProductFileRecord, ProductFileUuid},
        },
        onboarding::MockOnboardingService,
        products::{
            MockProductsService,
            records::{
                CompatibilityTag, LicenseType, ProductCategory, ProductRecord, ProductStatus,
                ProductUuid,
            },
        },
        profiles::{MockProfilesService, records::ProfileUuid},
        purchases::MockPurchasesService,
        webhooks::MockWebhooksService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_PROFILE_UUID: ProfileUuid = ProfileUuid::from_uuid(Uuid::nil());

pub(crate) fn make_product(seller: ProfileUuid, status: ProductStatus) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        seller_uuid: seller,
        title: "Prompt Kit".to_string(),
        slug: "prompt-kit-a1b2c3".to_string(),
        description: "Fifty tested prompts with worked examples.".to_string(),
        short_description: None,
        category: ProductCategory::WorkflowKit,
        license_type: LicenseType::Personal,
        compatibility_tags: vec![CompatibilityTag::Claude4, CompatibilityTag::Cursor],
        price: 2900,
        currency: "usd".to_string(),
        status,
        purchase_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_file(product: ProductUuid) -> ProductFileRecord {
    let uuid = ProductFileUuid::new();

    ProductFileRecord {
        uuid,
        product_uuid: product,
        file_name: "prompts.zip".to_string(),
        file_path: format!("products/{product}/{uuid}-prompts.zip"),
        file_size: Some(2048),
        file_type: Some("application/zip".to_string()),
        is_preview: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_profile(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_profile_uuid(TEST_PROFILE_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Mocks without expectations panic when called, so
/// each test only configures the services its handler should touch.
#[derive(Default)]
pub(crate) struct MockApp {
    pub products: MockProductsService,
    pub profiles: MockProfilesService,
    pub purchases: MockPurchasesService,
    pub files: MockFilesService,
    pub checkout: MockCheckoutService,
    pub onboarding: MockOnboardingService,
    pub webhooks: MockWebhooksService,
    pub auth: MockAuthService,
}

impl MockApp {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            profiles: Arc::new(self.profiles),
            purchases: Arc::new(self.purchases),
            files: Arc::new(self.files),
            checkout: Arc::new(self.checkout),
            onboarding: Arc::new(self.onboarding),
            webhooks: Arc::new(self.webhooks),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as if the caller were authenticated as [`TEST_PROFILE_UUID`].
    pub(crate) fn authenticated(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_profile)
                .push(route),
        )
    }

    /// Serve `route` without an authenticated profile.
    pub(crate) fn anonymous(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}
