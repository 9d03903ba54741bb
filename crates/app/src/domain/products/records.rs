//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::profiles::records::ProfileUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Where a product is in its listing lifecycle.
///
/// Statuses only move forward (`Draft -> InReview -> Published`), except that
/// anything not yet archived may be archived. Nothing leaves `Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Draft,
    InReview,
    Published,
    Archived,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::InReview)
                | (Self::InReview, Self::Published)
                | (Self::Draft | Self::InReview | Self::Published, Self::Archived)
        )
    }

    /// Whether the owning seller may still edit or delete the listing.
    #[must_use]
    pub const fn is_pre_publish(self) -> bool {
        matches!(self, Self::Draft | Self::InReview)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown product status: {0}")]
pub struct UnknownProductStatus(String);

impl FromStr for ProductStatus {
    type Err = UnknownProductStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "in_review" => Ok(Self::InReview),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(UnknownProductStatus(other.to_string())),
        }
    }
}

/// A stored attribute value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownAttribute {
    pub kind: &'static str,
    pub value: String,
}

/// Closed sets of lowercase names stored as `TEXT`.
macro_rules! named_variants {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownAttribute;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownAttribute {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

named_variants! {
    /// What kind of asset a listing sells.
    ProductCategory as "category" {
        Starter => "starter",
        WorkflowKit => "workflow_kit",
        Extension => "extension",
        Launchable => "launchable",
        ContextPack => "context_pack",
        Blueprint => "blueprint",
    }
}

named_variants! {
    /// Terms the buyer receives.
    LicenseType as "license type" {
        Personal => "personal",
        Commercial => "commercial",
        Team => "team",
    }
}

impl Default for LicenseType {
    fn default() -> Self {
        Self::Personal
    }
}

named_variants! {
    /// Model or tool a listing has been tested with.
    CompatibilityTag as "compatibility tag" {
        Claude45 => "claude_4.5",
        Claude4 => "claude_4",
        Gpt45 => "gpt_4.5",
        Gpt4 => "gpt_4",
        Gemini2 => "gemini_2",
        Cursor => "cursor",
        Windsurf => "windsurf",
        V0 => "v0",
        Bolt => "bolt",
        Lovable => "lovable",
        Replit => "replit",
    }
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub seller_uuid: ProfileUuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: ProductCategory,
    pub license_type: LicenseType,
    pub compatibility_tags: Vec<CompatibilityTag>,
    pub price: u64,
    pub currency: String,
    pub status: ProductStatus,
    pub purchase_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
