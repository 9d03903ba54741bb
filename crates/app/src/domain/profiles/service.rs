//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::profiles::{
        data::NewProfile,
        errors::ProfilesServiceError,
        records::{ProfileRecord, ProfileUuid},
        repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(
        &self,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn set_payment_account(
        &self,
        profile: ProfileUuid,
        account: String,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_payment_account(&mut tx, profile, &account)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn mark_onboarding_complete(
        &self,
        account: String,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .mark_onboarding_complete(&mut tx, &account)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Creates a new profile.
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Retrieve a single profile.
    async fn get_profile(&self, profile: ProfileUuid)
    -> Result<ProfileRecord, ProfilesServiceError>;

    /// Link a payment-provider connected account to the profile.
    async fn set_payment_account(
        &self,
        profile: ProfileUuid,
        account: String,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Flag the profile owning `account` as ready to receive payouts.
    ///
    /// There is no reverse operation.
    async fn mark_onboarding_complete(
        &self,
        account: String,
    ) -> Result<ProfileRecord, ProfilesServiceError>;
}
