//! Purchases Data

use crate::domain::{
    fees::FeeSplit,
    products::records::ProductUuid,
    profiles::records::ProfileUuid,
    purchases::records::PurchaseUuid,
};

/// New Purchase Data
///
/// Amounts come from a [`FeeSplit`], so the payout and fee always add up to
/// the amount charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub uuid: PurchaseUuid,
    pub buyer_uuid: ProfileUuid,
    pub product_uuid: ProductUuid,
    pub split: FeeSplit,
    pub payment_reference: String,
}

impl NewPurchase {
    #[must_use]
    pub fn new(
        buyer_uuid: ProfileUuid,
        product_uuid: ProductUuid,
        split: FeeSplit,
        payment_reference: impl Into<String>,
    ) -> Self {
        Self {
            uuid: PurchaseUuid::new(),
            buyer_uuid,
            product_uuid,
            split,
            payment_reference: payment_reference.into(),
        }
    }
}
