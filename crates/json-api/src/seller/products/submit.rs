//! Submit Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Submit Product Handler
///
/// Sends a draft to review. Published products are approved by an operator.
#[endpoint(
    tags("seller"),
    summary = "Submit Product For Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product in review"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is not a draft"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let product = state
        .app
        .products
        .submit_for_review(seller, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
