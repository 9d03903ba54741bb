//! Delete Product File Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, files::errors::into_status_error, state::State};

/// Delete Product File Handler
#[endpoint(
    tags("seller"),
    summary = "Delete Product File",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "File deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or file not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    file: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let deleted = state
        .app
        .files
        .delete_file(seller, product.into_inner().into(), file.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(file_path = %deleted.file_path, "product file detached");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use bazaar_app::domain::{
        files::{FilesServiceError, MockFilesService, records::ProductFileUuid},
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
        .authenticated(
            Router::with_path("seller/products/{product}/files/{file}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_file_success() -> TestResult {
        let product = ProductUuid::new();
        let uuid = ProductFileUuid::new();

        let mut files = MockFilesService::new();

        files
            .expect_delete_file()
            .once()
            .with(eq(TEST_PROFILE_UUID), eq(product), eq(uuid))
            .return_once(move |_, p, _| Ok(make_file(p)));

        let res = TestClient::delete(format!(
            "http://example.com/seller/products/{product}/files/{uuid}"
        ))
        .send(&make_service(files))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_file_returns_404() -> TestResult {
        let mut files = MockFilesService::new();

        files
            .expect_delete_file()
            .once()
            .return_once(|_, _, _| Err(FilesServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/seller/products/{}/files/{}",
            ProductUuid::new(),
            ProductFileUuid::new()
        ))
        .send(&make_service(files))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
