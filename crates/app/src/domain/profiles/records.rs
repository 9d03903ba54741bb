//! Profile Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Profile UUID
pub type ProfileUuid = TypedUuid<ProfileRecord>;

/// Seller subscription level; decides the platform fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SellerTier {
    #[default]
    Free,
    Pro,
    Team,
}

impl SellerTier {
    /// Share of each sale kept by the marketplace, in whole percent.
    #[must_use]
    pub const fn fee_percent(self) -> u64 {
        match self {
            Self::Free => 20,
            Self::Pro => 12,
            Self::Team => 8,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for SellerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown seller tier: {0}")]
pub struct UnknownSellerTier(String);

impl FromStr for SellerTier {
    type Err = UnknownSellerTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "team" => Ok(Self::Team),
            other => Err(UnknownSellerTier(other.to_string())),
        }
    }
}

/// Profile Record
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub uuid: ProfileUuid,
    pub email: String,
    pub username: String,
    pub seller_tier: SellerTier,
    pub payment_account: Option<String>,
    pub payment_onboarding_complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProfileRecord {
    /// The connected account payouts can be routed to, once onboarding has
    /// finished.
    #[must_use]
    pub fn payout_account(&self) -> Option<&str> {
        if !self.payment_onboarding_complete {
            return None;
        }

        self.payment_account.as_deref()
    }
}
