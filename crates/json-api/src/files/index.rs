//! Seller Product Files Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    files::{errors::into_status_error, responses::ProductFilesResponse},
    state::State,
};

/// Seller Product Files Handler
///
/// Files attached to one of the caller's products, oldest first.
#[endpoint(
    tags("seller"),
    summary = "List Product Files",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Files listed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductFilesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let files = state
        .app
        .files
        .list_seller_files(seller, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(files.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::{
        files::{FilesServiceError, MockFilesService},
        products::records::ProductUuid,
    };
    use mockall::predicate::eq;

    use crate::test_helpers::{MockApp, TEST_PROFILE_UUID, make_file};

    use super::*;

    fn make_service(files: MockFilesService) -> Service {
        MockApp {
            files,
            ..MockApp::default()
        }
        .authenticated(Router::with_path("seller/products/{product}/files").get(handler))
    }

    #[tokio::test]
    async fn test_list_seller_files() -> TestResult {
        let product = ProductUuid::new();
        let file = make_file(product);
        let expected = file.uuid.into_uuid();

        let mut files = MockFilesService::new();

        files
            .expect_list_seller_files()
            .once()
            .with(eq(TEST_PROFILE_UUID), eq(product))
            .return_once(move |_, _| Ok(vec![file]));

        let response: ProductFilesResponse =
            TestClient::get(format!("http://example.com/seller/products/{product}/files"))
                .send(&make_service(files))
                .await
                .take_json()
                .await?;

        assert_eq!(
            response.files.iter().map(|f| f.uuid).collect::<Vec<_>>(),
            vec![expected]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_product_returns_404() -> TestResult {
        let mut files = MockFilesService::new();

        files
            .expect_list_seller_files()
            .once()
            .return_once(|_, _| Err(FilesServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/seller/products/{}/files",
            ProductUuid::new()
        ))
        .send(&make_service(files))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
