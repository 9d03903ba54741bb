//! Profile Data

use crate::domain::profiles::records::{ProfileUuid, SellerTier};

/// New Profile Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub uuid: ProfileUuid,
    pub email: String,
    pub username: String,
    pub seller_tier: SellerTier,
}
