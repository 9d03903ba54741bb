//! Platform fee split

use crate::domain::profiles::records::SellerTier;

/// How a sale amount divides between the platform and the seller.
///
/// `platform_fee + seller_payout == amount` holds for every value of this
/// type; the fields are private so the only ways in are the constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    amount: u64,
    platform_fee: u64,
    seller_payout: u64,
}

impl FeeSplit {
    /// Split `price` using the seller's tier rate, rounding the fee half-up.
    #[must_use]
    pub fn for_tier(price: u64, tier: SellerTier) -> Self {
        let scaled = u128::from(price) * u128::from(tier.fee_percent()) + 50;
        // fee_percent is at most 100, so the quotient never exceeds price.
        let platform_fee = u64::try_from(scaled / 100).unwrap_or(price).min(price);

        Self {
            amount: price,
            platform_fee,
            seller_payout: price - platform_fee,
        }
    }

    /// Rebuild a split from a settled amount and the fee that was charged.
    #[must_use]
    pub fn from_platform_fee(amount: u64, platform_fee: u64) -> Option<Self> {
        let seller_payout = amount.checked_sub(platform_fee)?;

        Some(Self {
            amount,
            platform_fee,
            seller_payout,
        })
    }

    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    #[must_use]
    pub const fn platform_fee(&self) -> u64 {
        self.platform_fee
    }

    #[must_use]
    pub const fn seller_payout(&self) -> u64 {
        self.seller_payout
    }
}
