//! In-memory records for mock-backed tests.

use jiff::Timestamp;

use crate::domain::{
    products::records::{
        CompatibilityTag, LicenseType, ProductCategory, ProductRecord, ProductStatus, ProductUuid,
    },
    profiles::records::{ProfileRecord, ProfileUuid, SellerTier},
};

/// A profile with no payment account.
pub fn profile_record(tier: SellerTier) -> ProfileRecord {
    let uuid = ProfileUuid::new();
    let handle = uuid.into_uuid().simple().to_string();

    ProfileRecord {
        uuid,
        email: format!("{handle}@example.com"),
        username: handle,
        seller_tier: tier,
        payment_account: None,
        payment_onboarding_complete: false,
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}

pub fn product_record(seller: ProfileUuid, status: ProductStatus, price: u64) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        seller_uuid: seller,
        title: "Prompt Kit".to_string(),
        slug: "prompt-kit-a1b2c3".to_string(),
        description: "Fifty tested prompts with worked examples.".to_string(),
        short_description: Some("Fifty tested prompts".to_string()),
        category: ProductCategory::WorkflowKit,
        license_type: LicenseType::Personal,
        compatibility_tags: vec![CompatibilityTag::Cursor],
        price,
        currency: "usd".to_string(),
        status,
        purchase_count: 0,
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}
