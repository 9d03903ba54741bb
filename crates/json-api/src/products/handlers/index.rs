//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use bazaar_app::domain::products::{data::Page, records::ProductCategory};

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductsResponse},
    state::State,
};

/// Product Index Handler
///
/// Lists published products, newest first, optionally within one category.
#[endpoint(
    tags("products"),
    summary = "List Published Products",
    responses(
        (status_code = StatusCode::OK, description = "Products listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = Page::new(limit.into_inner(), offset.into_inner());
    let category = category
        .into_inner()
        .map(|category| category.parse::<ProductCategory>())
        .transpose()
        .or_400("unknown category")?;

    let products = state
        .app
        .products
        .list_published_products(page, category)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductStatus,
    };
    use mockall::predicate::eq;

    use crate::test_helpers::{MockApp, TEST_PROFILE_UUID, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        MockApp {
            products,
            ..MockApp::default()
        }
        .anonymous(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_uses_default_page() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_published_products()
            .once()
            .with(
                eq(Page {
                    limit: 20,
                    offset: 0,
                }),
                eq(None),
            )
            .return_once(|_, _| Ok(vec![]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_clamps_limit_and_forwards_offset() -> TestResult {
        let first = make_product(TEST_PROFILE_UUID, ProductStatus::Published);
        let expected = first.uuid.into_uuid();

        let mut products = MockProductsService::new();

        products
            .expect_list_published_products()
            .once()
            .with(
                eq(Page {
                    limit: 100,
                    offset: 40,
                }),
                eq(None),
            )
            .return_once(move |_, _| Ok(vec![first]));

        let response: ProductsResponse =
            TestClient::get("http://example.com/products?limit=500&offset=40")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(
            response
                .products
                .iter()
                .map(|product| product.uuid)
                .collect::<Vec<_>>(),
            vec![expected]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_category() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_published_products()
            .once()
            .with(eq(Page::default()), eq(Some(ProductCategory::WorkflowKit)))
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?category=workflow_kit")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_category_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products?category=screensaver")
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_published_products()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
