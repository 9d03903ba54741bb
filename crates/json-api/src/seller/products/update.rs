//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bazaar_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    seller::products::requests::UpdateProductRequest,
    state::State,
};

/// Update Product Handler
///
/// Only drafts and products in review can be edited.
#[endpoint(
    tags("seller"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product is locked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let update =
        ProductUpdate::try_from(json.into_inner()).or_400("invalid product attributes")?;

    let product = state
        .app
        .products
        .update_product(seller, product.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
