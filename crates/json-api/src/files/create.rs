//! Add Product File Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::files::{data::NewProductFile, records::ProductFileUuid};

use crate::{
    extensions::*,
    files::{errors::into_status_error, responses::ProductFileResponse},
    state::State,
};

/// Add Product File Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddFileRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub file_name: String,

    /// Size in bytes
    #[serde(default)]
    pub file_size: Option<u64>,

    /// Media type, e.g. `application/zip`
    #[serde(default)]
    pub file_type: Option<String>,

    #[serde(default)]
    pub is_preview: bool,
}

impl From<AddFileRequest> for NewProductFile {
    fn from(request: AddFileRequest) -> Self {
        NewProductFile {
            uuid: request
                .uuid
                .map_or_else(ProductFileUuid::new, ProductFileUuid::from_uuid),
            file_name: request.file_name,
            file_size: request.file_size,
            file_type: request.file_type,
            is_preview: request.is_preview,
        }
    }
}

/// Add Product File Handler
///
/// Registers a file against one of the caller's products. The response
/// carries the storage path the bytes belong under.
#[endpoint(
    tags("seller"),
    summary = "Add Product File",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "File added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AddFileRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductFileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let file = state
        .app
        .files
        .add_file(seller, product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(file.into()))
}
