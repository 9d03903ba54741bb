//! Purchase Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::purchases::records::PurchaseRecord;

use crate::{extensions::*, purchases::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Amount charged, in cents
    pub amount: u64,

    pub created_at: String,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(purchase: PurchaseRecord) -> Self {
        Self {
            uuid: purchase.uuid.into_uuid(),
            product_uuid: purchase.product_uuid.into_uuid(),
            amount: purchase.amount,
            created_at: purchase.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasesResponse {
    pub purchases: Vec<PurchaseResponse>,
}

/// Purchase Index Handler
///
/// The caller's purchases, newest first.
#[endpoint(
    tags("purchases"),
    summary = "List Purchases",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PurchasesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.profile_uuid_or_401()?;

    let purchases = state
        .app
        .purchases
        .list_buyer_purchases(buyer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PurchasesResponse {
        purchases: purchases.into_iter().map(Into::into).collect(),
    }))
}
