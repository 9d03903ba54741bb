//! Stripe REST client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;
use zeroize::Zeroizing;

use crate::payments::{
    errors::PaymentsError,
    provider::{
        CheckoutSession, CheckoutSessionRequest, ConnectedAccount, ConnectedAccountRequest,
        OnboardingLink, OnboardingLinkRequest, PaymentProvider,
    },
};

/// Configuration for connecting to the payment provider's API.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API base address, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Secret API key sent as a bearer token.
    pub secret_key: Zeroizing<String>,
}

/// HTTP client for the provider's form-encoded REST API.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

type FormParams = Vec<(String, String)>;

impl StripeClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &FormParams,
    ) -> Result<T, PaymentsError> {
        let url = format!("{}{path}", self.config.api_base.trim_end_matches('/'));

        debug!(%url, "calling payment provider");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.secret_key.as_str())
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentsError::UnexpectedResponse(format!(
                "{path} failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentsError> {
        let params = checkout_session_params(&request);

        let session: SessionResponse = self.post_form("/v1/checkout/sessions", &params).await?;

        let url = session.url.ok_or_else(|| {
            PaymentsError::UnexpectedResponse(format!("checkout session {} has no url", session.id))
        })?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn create_connected_account(
        &self,
        request: ConnectedAccountRequest,
    ) -> Result<ConnectedAccount, PaymentsError> {
        let params = connected_account_params(&request);

        let account: AccountResponse = self.post_form("/v1/accounts", &params).await?;

        Ok(ConnectedAccount { id: account.id })
    }

    async fn create_onboarding_link(
        &self,
        request: OnboardingLinkRequest,
    ) -> Result<OnboardingLink, PaymentsError> {
        let params = onboarding_link_params(&request);

        let link: AccountLinkResponse = self.post_form("/v1/account_links", &params).await?;

        Ok(OnboardingLink { url: link.url })
    }
}

fn push(params: &mut FormParams, key: impl Into<String>, value: impl Into<String>) {
    params.push((key.into(), value.into()));
}

fn checkout_session_params(request: &CheckoutSessionRequest) -> FormParams {
    let mut params = FormParams::new();

    push(&mut params, "mode", "payment");
    push(&mut params, "customer_email", &request.customer_email);

    push(&mut params, "line_items[0][quantity]", "1");
    push(
        &mut params,
        "line_items[0][price_data][currency]",
        &request.currency,
    );
    push(
        &mut params,
        "line_items[0][price_data][unit_amount]",
        request.unit_amount.to_string(),
    );
    push(
        &mut params,
        "line_items[0][price_data][product_data][name]",
        &request.product_name,
    );

    if let Some(description) = &request.product_description {
        push(
            &mut params,
            "line_items[0][price_data][product_data][description]",
            description,
        );
    }

    push(
        &mut params,
        "payment_intent_data[application_fee_amount]",
        request.application_fee.to_string(),
    );
    push(
        &mut params,
        "payment_intent_data[transfer_data][destination]",
        &request.destination_account,
    );

    for (key, value) in request.metadata.to_pairs() {
        push(
            &mut params,
            format!("payment_intent_data[metadata][{key}]"),
            value.clone(),
        );
        push(&mut params, format!("metadata[{key}]"), value);
    }

    push(&mut params, "success_url", &request.success_url);
    push(&mut params, "cancel_url", &request.cancel_url);

    params
}

fn connected_account_params(request: &ConnectedAccountRequest) -> FormParams {
    let mut params = FormParams::new();

    push(&mut params, "type", "express");
    push(&mut params, "email", &request.email);
    push(&mut params, "metadata[user_id]", request.profile.to_string());

    params
}

fn onboarding_link_params(request: &OnboardingLinkRequest) -> FormParams {
    let mut params = FormParams::new();

    push(&mut params, "account", &request.account);
    push(&mut params, "refresh_url", &request.refresh_url);
    push(&mut params, "return_url", &request.return_url);
    push(&mut params, "type", "account_onboarding");

    params
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AccountLinkResponse {
    url: String,
}
