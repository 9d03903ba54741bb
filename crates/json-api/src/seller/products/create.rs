//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use bazaar_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    seller::products::requests::CreateProductRequest,
    state::State,
};

/// Create Product Handler
///
/// New products start as drafts.
#[endpoint(
    tags("seller"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let new_product =
        NewProduct::try_from(json.into_inner()).or_400("invalid product attributes")?;

    let product = state
        .app
        .products
        .create_product(seller, new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/seller/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
