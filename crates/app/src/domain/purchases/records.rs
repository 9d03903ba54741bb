//! Purchase Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, profiles::records::ProfileUuid},
    uuids::TypedUuid,
};

/// Purchase UUID
pub type PurchaseUuid = TypedUuid<PurchaseRecord>;

/// Purchase Record
///
/// Written once when a completed checkout is confirmed and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub uuid: PurchaseUuid,
    pub buyer_uuid: ProfileUuid,
    pub product_uuid: ProductUuid,
    pub amount: u64,
    pub platform_fee: u64,
    pub seller_payout: u64,
    pub payment_reference: String,
    pub created_at: Timestamp,
}

/// Result of recording a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseInsert {
    Created(PurchaseRecord),

    /// The buyer already owns the product; nothing was written.
    AlreadyRecorded,
}

/// Seller dashboard totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SellerStats {
    pub total_products: u64,
    pub published_products: u64,
    pub total_sales: u64,

    /// Sum of seller payouts in minor currency units.
    pub total_revenue: u64,
}
