//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::profiles::{
    data::NewProfile,
    records::{ProfileRecord, ProfileUuid, SellerTier},
};

const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const SET_PAYMENT_ACCOUNT_SQL: &str = include_str!("sql/set_payment_account.sql");
const MARK_ONBOARDING_COMPLETE_SQL: &str = include_str!("sql/mark_onboarding_complete.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: NewProfile,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(CREATE_PROFILE_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(profile.email)
            .bind(profile.username)
            .bind(profile.seller_tier.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_payment_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        account: &str,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(SET_PAYMENT_ACCOUNT_SQL)
            .bind(profile.into_uuid())
            .bind(account)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_onboarding_complete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: &str,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(MARK_ONBOARDING_COMPLETE_SQL)
            .bind(account)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let seller_tier = row
            .try_get::<String, _>("seller_tier")?
            .parse::<SellerTier>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "seller_tier".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            seller_tier,
            payment_account: row.try_get("payment_account")?,
            payment_onboarding_complete: row.try_get("payment_onboarding_complete")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
