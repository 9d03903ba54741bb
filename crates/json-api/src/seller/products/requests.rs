//! Listing payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{CompatibilityTag, LicenseType, ProductUuid, UnknownAttribute},
};

fn parse_license(license_type: Option<&str>) -> Result<LicenseType, UnknownAttribute> {
    license_type.map_or_else(|| Ok(LicenseType::default()), str::parse)
}

fn parse_tags(tags: &[String]) -> Result<Vec<CompatibilityTag>, UnknownAttribute> {
    tags.iter().map(|tag| tag.parse()).collect()
}

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub title: String,

    pub description: String,

    #[serde(default)]
    pub short_description: Option<String>,

    /// One of `starter`, `workflow_kit`, `extension`, `launchable`,
    /// `context_pack` or `blueprint`
    pub category: String,

    /// `personal` (default), `commercial` or `team`
    #[serde(default)]
    pub license_type: Option<String>,

    /// Models and tools the product was tested with, e.g. `claude_4` or `cursor`
    #[serde(default)]
    pub compatibility_tags: Vec<String>,

    /// Price in cents
    pub price: u64,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = UnknownAttribute;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            category: request.category.parse()?,
            license_type: parse_license(request.license_type.as_deref())?,
            compatibility_tags: parse_tags(&request.compatibility_tags)?,
            title: request.title,
            description: request.description,
            short_description: request.short_description,
            price: request.price,
        })
    }
}

/// Update Product Request
///
/// Replaces every listing field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub title: String,

    pub description: String,

    #[serde(default)]
    pub short_description: Option<String>,

    pub category: String,

    #[serde(default)]
    pub license_type: Option<String>,

    #[serde(default)]
    pub compatibility_tags: Vec<String>,

    /// Price in cents
    pub price: u64,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = UnknownAttribute;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            category: request.category.parse()?,
            license_type: parse_license(request.license_type.as_deref())?,
            compatibility_tags: parse_tags(&request.compatibility_tags)?,
            title: request.title,
            description: request.description,
            short_description: request.short_description,
            price: request.price,
        })
    }
}
