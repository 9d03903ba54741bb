//! Purchased Product Files Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    files::{errors::into_status_error, responses::ProductFilesResponse},
    state::State,
};

/// Purchased Product Files Handler
///
/// Files of a product the caller has bought. Sellers may list their own.
#[endpoint(
    tags("purchases"),
    summary = "List Purchased Files",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Files listed"),
        (status_code = StatusCode::FORBIDDEN, description = "Product not purchased"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductFilesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.profile_uuid_or_401()?;

    let files = state
        .app
        .files
        .list_purchased_files(buyer, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(files.into_iter().collect()))
}
