//! Payments Config

use bazaar_app::payments::signature::DEFAULT_TOLERANCE_SECONDS;
use clap::Args;

/// Payment provider settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Provider API base address
    #[arg(
        long = "payments-api-base",
        env = "PAYMENTS_API_BASE",
        default_value = "https://api.stripe.com"
    )]
    pub api_base: String,

    /// Provider secret API key
    #[arg(
        long = "payments-secret-key",
        env = "PAYMENTS_SECRET_KEY",
        hide_env_values = true
    )]
    pub secret_key: String,

    /// Shared secret used to sign webhook deliveries
    #[arg(
        long = "payments-webhook-secret",
        env = "PAYMENTS_WEBHOOK_SECRET",
        hide_env_values = true
    )]
    pub webhook_secret: String,

    /// Maximum age of a webhook signature timestamp, in seconds
    #[arg(
        long = "payments-webhook-tolerance-seconds",
        env = "PAYMENTS_WEBHOOK_TOLERANCE_SECONDS",
        default_value_t = DEFAULT_TOLERANCE_SECONDS
    )]
    pub webhook_tolerance_seconds: u64,
}
