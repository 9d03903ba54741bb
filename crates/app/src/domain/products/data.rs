//! Products Data

use crate::domain::products::{
    records::{CompatibilityTag, LicenseType, ProductCategory, ProductUuid},
    validation::{
        ProductValidationError, normalize_compatibility_tags, normalize_short_description,
        validate_listing,
    },
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: ProductCategory,
    pub license_type: LicenseType,
    pub compatibility_tags: Vec<CompatibilityTag>,
    pub price: u64,
}

impl NewProduct {
    /// Trim and check the listing fields.
    ///
    /// # Errors
    ///
    /// Returns the first field that falls outside its allowed range.
    pub fn validated(self) -> Result<Self, ProductValidationError> {
        let product = Self {
            title: self.title.trim().to_string(),
            short_description: normalize_short_description(self.short_description),
            compatibility_tags: normalize_compatibility_tags(self.compatibility_tags),
            ..self
        };

        validate_listing(
            &product.title,
            &product.description,
            product.short_description.as_deref(),
            product.price,
        )?;

        Ok(product)
    }
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: ProductCategory,
    pub license_type: LicenseType,
    pub compatibility_tags: Vec<CompatibilityTag>,
    pub price: u64,
}

impl ProductUpdate {
    /// Trim and check the listing fields.
    ///
    /// # Errors
    ///
    /// Returns the first field that falls outside its allowed range.
    pub fn validated(self) -> Result<Self, ProductValidationError> {
        let update = Self {
            title: self.title.trim().to_string(),
            short_description: normalize_short_description(self.short_description),
            compatibility_tags: normalize_compatibility_tags(self.compatibility_tags),
            ..self
        };

        validate_listing(
            &update.title,
            &update.description,
            update.short_description.as_deref(),
            update.price,
        )?;

        Ok(update)
    }
}

/// Offset pagination for public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    #[must_use]
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
