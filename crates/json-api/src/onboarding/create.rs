//! Start Onboarding Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, onboarding::errors::into_status_error, redirect::RedirectResponse,
    state::State,
};

/// Start Onboarding Handler
///
/// Links the caller to the payment provider's onboarding form, creating a
/// connected account on first use.
#[endpoint(
    tags("onboarding"),
    summary = "Start Payout Onboarding",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Onboarding link created"),
        (status_code = StatusCode::CONFLICT, description = "Already onboarded"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RedirectResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.profile_uuid_or_401()?;

    let redirect = state
        .app
        .onboarding
        .start_onboarding(seller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RedirectResponse { url: redirect.url }))
}
