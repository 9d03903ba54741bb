//! Onboarding Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::onboarding::OnboardingError;

pub(crate) fn into_status_error(error: OnboardingError) -> StatusError {
    match error {
        OnboardingError::NotAuthenticated => StatusError::unauthorized()
            .brief("Sign in to set up payouts")
            .detail("not_authenticated"),
        OnboardingError::AlreadyOnboarded => StatusError::conflict()
            .brief("Payouts are already set up")
            .detail("already_onboarded"),
        OnboardingError::PaymentProvider(source) => {
            error!("payment provider rejected onboarding: {source}");

            StatusError::internal_server_error().detail("payment_provider_error")
        }
        OnboardingError::Profiles(source) => {
            error!("failed to load seller profile: {source}");

            StatusError::internal_server_error().detail("internal_error")
        }
    }
}
