//! Depot helper extensions.

use std::any::Any;

use bazaar_app::domain::profiles::records::ProfileUuid;
use salvo::prelude::{Depot, StatusError};

const PROFILE_UUID_DEPOT_KEY: &str = "profile_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the profile the request is authenticated as.
    fn insert_profile_uuid(&mut self, profile: ProfileUuid);

    fn profile_uuid_or_401(&self) -> Result<ProfileUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_profile_uuid(&mut self, profile: ProfileUuid) {
        self.insert(PROFILE_UUID_DEPOT_KEY, profile);
    }

    fn profile_uuid_or_401(&self) -> Result<ProfileUuid, StatusError> {
        self.get::<ProfileUuid>(PROFILE_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
