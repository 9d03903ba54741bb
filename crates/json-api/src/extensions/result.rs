//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{error, warn};

pub(crate) trait ResultExt<T> {
    /// Log the error and hide it behind a bare 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Reject the request as malformed, echoing `brief` to the caller.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            warn!("{brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_500_hides_the_cause() {
        let result: Result<(), &str> = Err("connection reset");

        let error = result.or_500("failed to load").err();

        assert_eq!(
            error.map(|error| (error.code, error.brief.contains("connection reset"))),
            Some((StatusCode::INTERNAL_SERVER_ERROR, false))
        );
    }

    #[test]
    fn or_400_carries_the_brief() {
        let result: Result<(), &str> = Err("eof");

        let error = result.or_400("could not read body").err();

        assert_eq!(
            error.map(|error| (error.code, error.brief)),
            Some((StatusCode::BAD_REQUEST, "could not read body".to_string()))
        );
    }
}
