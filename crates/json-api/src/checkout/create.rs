//! Create Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    checkout::errors::into_status_error, extensions::*, redirect::RedirectResponse, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCheckoutRequest {
    /// The published product to buy
    pub product_uuid: Uuid,
}

/// Create Checkout Handler
///
/// Opens a hosted checkout session. The purchase is recorded once the payment
/// provider confirms it.
#[endpoint(
    tags("checkout"),
    summary = "Start Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout session created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Seller cannot accept payments"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product already purchased"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<RedirectResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.profile_uuid_or_401()?;

    let redirect = state
        .app
        .checkout
        .start_checkout(buyer, json.into_inner().product_uuid.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(RedirectResponse { url: redirect.url }))
}
