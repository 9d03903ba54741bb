//! Public Site Config

use clap::Args;

/// Public site settings used to build redirect URLs.
#[derive(Debug, Args)]
pub struct AppUrlConfig {
    /// Base URL of the storefront, e.g. `https://bazaar.example`
    #[arg(long, env = "APP_URL")]
    pub app_url: String,
}
