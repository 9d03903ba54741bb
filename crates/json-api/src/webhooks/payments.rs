//! Payment Webhook Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bazaar_app::payments::signature::SIGNATURE_HEADER;

use crate::{extensions::*, observability::observe_webhook_delivery, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookReceivedResponse {
    pub received: bool,
}

/// Payment Webhook Handler
///
/// Authenticated deliveries are always acknowledged, even when they could not
/// be applied, so the provider does not retry them.
#[endpoint(
    tags("webhooks"),
    summary = "Payment Provider Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Delivery acknowledged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Signature rejected"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WebhookReceivedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let signature = req.header::<String>(SIGNATURE_HEADER);

    let payload = req
        .payload()
        .await
        .or_400("could not read webhook body")?
        .to_vec();

    let outcome = state
        .app
        .webhooks
        .handle_delivery(payload, signature)
        .await
        .map_err(|error| {
            warn!("rejected webhook delivery: {error}");
            observe_webhook_delivery("rejected");

            StatusError::bad_request()
                .brief("Invalid webhook signature")
                .detail("invalid_signature")
        })?;

    info!(%outcome, "webhook delivery processed");
    observe_webhook_delivery(outcome.as_str());

    Ok(Json(WebhookReceivedResponse { received: true }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::{
        domain::webhooks::{MockWebhooksService, WebhookError, WebhookOutcome},
        payments::signature::SignatureError,
    };

    use crate::test_helpers::MockApp;

    use super::*;

    const BODY: &str = r#"{"id":"evt_1","type":"checkout.session.completed"}"#;

    fn make_service(webhooks: MockWebhooksService) -> Service {
        MockApp {
            webhooks,
            ..MockApp::default()
        }
        .anonymous(Router::with_path("webhooks/payments").post(handler))
    }

    #[tokio::test]
    async fn test_signed_delivery_is_acknowledged() -> TestResult {
        let mut webhooks = MockWebhooksService::new();

        webhooks
            .expect_handle_delivery()
            .once()
            .withf(|payload, signature| {
                payload.as_slice() == BODY.as_bytes()
                    && signature.as_deref() == Some("t=1,v1=abc")
            })
            .return_once(|_, _| Ok(WebhookOutcome::PurchaseRecorded));

        let mut res = TestClient::post("http://example.com/webhooks/payments")
            .add_header(SIGNATURE_HEADER, "t=1,v1=abc", true)
            .raw_json(BODY)
            .send(&make_service(webhooks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: WebhookReceivedResponse = res.take_json().await?;

        assert!(body.received);

        Ok(())
    }

    #[tokio::test]
    async fn test_discarded_delivery_is_still_acknowledged() -> TestResult {
        let mut webhooks = MockWebhooksService::new();

        webhooks
            .expect_handle_delivery()
            .once()
            .return_once(|_, _| Ok(WebhookOutcome::Discarded));

        let res = TestClient::post("http://example.com/webhooks/payments")
            .add_header(SIGNATURE_HEADER, "t=1,v1=abc", true)
            .raw_json(BODY)
            .send(&make_service(webhooks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_signature_returns_400() -> TestResult {
        let mut webhooks = MockWebhooksService::new();

        webhooks
            .expect_handle_delivery()
            .once()
            .withf(|_, signature| signature.is_none())
            .return_once(|_, _| Err(WebhookError::Signature(SignatureError::Missing)));

        let res = TestClient::post("http://example.com/webhooks/payments")
            .raw_json(BODY)
            .send(&make_service(webhooks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
