//! Seller Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::purchases::records::SellerStats;

use crate::{extensions::*, purchases::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SellerStatsResponse {
    /// Products owned, in any status
    pub total_products: u64,

    pub published_products: u64,

    /// Completed purchases across all products
    pub total_sales: u64,

    /// Sum of seller payouts, in cents
    pub total_revenue: u64,
}

impl From<SellerStats> for SellerStatsResponse {
    fn from(stats: SellerStats) -> Self {
        Self {
            total_products: stats.total_products,
            published_products: stats.published_products,
            total_sales: stats.total_sales,
            total_revenue: stats.total_revenue,
        }
    }
}

/// Seller Stats Handler
#[endpoint(
    tags("seller"),
    summary = "Seller Dashboard Totals",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SellerStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let stats = state
        .app
        .purchases
        .seller_stats(seller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
