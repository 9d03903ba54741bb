//! Hosted-page redirects

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Where the client should send the user next.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedirectResponse {
    pub url: String,
}
