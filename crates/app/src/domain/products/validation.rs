//! Listing field validation.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::domain::products::records::CompatibilityTag;

pub const TITLE_LENGTH: RangeInclusive<usize> = 3..=100;
pub const MIN_DESCRIPTION_LENGTH: usize = 20;
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 160;

/// Price bounds in minor currency units ($1.00 to $999.00).
pub const PRICE_RANGE: RangeInclusive<u64> = 100..=99_900;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    #[error("title must be between 3 and 100 characters")]
    TitleLength,

    #[error("description must be at least 20 characters")]
    DescriptionTooShort,

    #[error("short description must be under 160 characters")]
    ShortDescriptionTooLong,

    #[error("price {0} is outside the allowed range")]
    PriceOutOfRange(u64),
}

pub(crate) fn validate_listing(
    title: &str,
    description: &str,
    short_description: Option<&str>,
    price: u64,
) -> Result<(), ProductValidationError> {
    if !TITLE_LENGTH.contains(&title.chars().count()) {
        return Err(ProductValidationError::TitleLength);
    }

    if description.trim().chars().count() < MIN_DESCRIPTION_LENGTH {
        return Err(ProductValidationError::DescriptionTooShort);
    }

    if short_description.is_some_and(|short| short.chars().count() > MAX_SHORT_DESCRIPTION_LENGTH)
    {
        return Err(ProductValidationError::ShortDescriptionTooLong);
    }

    if !PRICE_RANGE.contains(&price) {
        return Err(ProductValidationError::PriceOutOfRange(price));
    }

    Ok(())
}

pub(crate) fn normalize_short_description(value: Option<String>) -> Option<String> {
    value
        .map(|short| short.trim().to_string())
        .filter(|short| !short.is_empty())
}

/// Tags in declaration order, each at most once.
pub(crate) fn normalize_compatibility_tags(
    mut tags: Vec<CompatibilityTag>,
) -> Vec<CompatibilityTag> {
    tags.sort_unstable();
    tags.dedup();
    tags
}
