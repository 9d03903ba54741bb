//! Seller Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductsResponse},
    state::State,
};

/// Seller Product Index Handler
///
/// Lists every product owned by the caller, in any status.
#[endpoint(
    tags("seller"),
    summary = "List Own Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let products = state
        .app
        .products
        .list_seller_products(seller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::products::{MockProductsService, records::ProductStatus};
    use mockall::predicate::eq;

    use crate::test_helpers::{MockApp, TEST_PROFILE_UUID, make_product};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_drafts_and_published() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_seller_products()
            .once()
            .with(eq(TEST_PROFILE_UUID))
            .return_once(|seller| {
                Ok(vec![
                    make_product(seller, ProductStatus::Draft),
                    make_product(seller, ProductStatus::Published),
                ])
            });

        let service = MockApp {
            products,
            ..MockApp::default()
        }
        .authenticated(Router::with_path("seller/products").get(handler));

        let response: ProductsResponse = TestClient::get("http://example.com/seller/products")
            .send(&service)
            .await
            .take_json()
            .await?;

        let statuses: Vec<&str> = response
            .products
            .iter()
            .map(|product| product.status.as_str())
            .collect();

        assert_eq!(statuses, vec!["draft", "published"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_profile_returns_401() -> TestResult {
        let service = MockApp::default().anonymous(Router::with_path("seller/products").get(handler));

        let res = TestClient::get("http://example.com/seller/products")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
