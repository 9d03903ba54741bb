//! Product Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::records::ProductRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The selling profile
    pub seller_uuid: Uuid,

    pub title: String,

    /// URL-safe handle, unique across the marketplace
    pub slug: String,

    pub description: String,

    pub short_description: Option<String>,

    /// Listing category, e.g. `workflow_kit`
    pub category: String,

    /// `personal`, `commercial` or `team`
    pub license_type: String,

    /// Models and tools the product was tested with
    pub compatibility_tags: Vec<String>,

    /// The price of the product in cents
    pub price: u64,

    /// Lowercase ISO 4217 code
    pub currency: String,

    /// One of `draft`, `in_review`, `published` or `archived`
    pub status: String,

    /// Completed sales
    pub purchase_count: u64,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into_uuid(),
            seller_uuid: product.seller_uuid.into_uuid(),
            title: product.title,
            slug: product.slug,
            description: product.description,
            short_description: product.short_description,
            category: product.category.to_string(),
            license_type: product.license_type.to_string(),
            compatibility_tags: product
                .compatibility_tags
                .iter()
                .map(ToString::to_string)
                .collect(),
            price: product.price,
            currency: product.currency,
            status: product.status.to_string(),
            purchase_count: product.purchase_count,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

impl FromIterator<ProductRecord> for ProductsResponse {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(records: I) -> Self {
        Self {
            products: records.into_iter().map(Into::into).collect(),
        }
    }
}
