//! App Router

use salvo::Router;

use crate::{
    auth, checkout, files, healthcheck, observability, onboarding, products, purchases, seller,
    webhooks,
};

/// Routes served without a bearer token.
pub(crate) fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("webhooks/payments").post(webhooks::payments::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("by-slug/{slug}").get(products::by_slug::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

/// Routes that act for the profile owning the bearer token.
pub(crate) fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(Router::with_path("onboarding").post(onboarding::create::handler))
        .push(
            Router::with_path("purchases")
                .get(purchases::index::handler)
                .push(Router::with_path("{product}/files").get(files::purchased::handler)),
        )
        .push(
            Router::with_path("seller")
                .push(Router::with_path("stats").get(seller::stats::handler))
                .push(
                    Router::with_path("products")
                        .get(seller::products::index::handler)
                        .post(seller::products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(seller::products::update::handler)
                                .delete(seller::products::delete::handler)
                                .push(
                                    Router::with_path("submit")
                                        .post(seller::products::submit::handler),
                                )
                                .push(
                                    Router::with_path("archive")
                                        .post(seller::products::archive::handler),
                                )
                                .push(
                                    Router::with_path("files")
                                        .get(files::index::handler)
                                        .post(files::create::handler)
                                        .push(
                                            Router::with_path("{file}")
                                                .delete(files::delete::handler),
                                        ),
                                ),
                        ),
                ),
        )
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(authenticated_router())
}
