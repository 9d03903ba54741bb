//! Bazaar JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use zeroize::Zeroizing;

use bazaar_app::{
    context::{AppContext, AppSettings},
    payments::StripeConfig,
};

use crate::{config::ServerConfig, state::State};

mod auth;
mod checkout;
mod config;
mod extensions;
mod files;
mod healthcheck;
mod observability;
mod onboarding;
mod products;
mod purchases;
mod redirect;
mod router;
mod seller;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod webhooks;

impl From<ServerConfig> for AppSettings {
    fn from(config: ServerConfig) -> Self {
        Self {
            database_url: config.database.database_url,
            database_max_connections: config.database.database_max_connections,
            stripe: StripeConfig {
                api_base: config.payments.api_base,
                secret_key: Zeroizing::new(config.payments.secret_key),
            },
            webhook_secret: Zeroizing::new(config.payments.webhook_secret),
            webhook_tolerance_seconds: config.payments.webhook_tolerance_seconds,
            app_url: config.app.app_url,
        }
    }
}

/// Bazaar JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    let app = match AppContext::from_settings(config.into()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let doc = OpenApi::new("Bazaar API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
