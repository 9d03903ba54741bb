//! Product Files Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    files::{
        data::NewProductFile,
        records::{ProductFileRecord, ProductFileUuid},
    },
    products::records::ProductUuid,
    profiles::records::ProfileUuid,
};

const GET_PRODUCT_SELLER_SQL: &str = include_str!("sql/get_product_seller.sql");
const HAS_PURCHASE_SQL: &str = include_str!("sql/has_purchase.sql");
const INSERT_FILE_SQL: &str = include_str!("sql/insert_file.sql");
const LIST_FILES_SQL: &str = include_str!("sql/list_files.sql");
const DELETE_FILE_SQL: &str = include_str!("sql/delete_file.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFilesRepository;

impl PgFilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product_seller(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProfileUuid, sqlx::Error> {
        let seller: Uuid = query_scalar(GET_PRODUCT_SELLER_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProfileUuid::from_uuid(seller))
    }

    pub(crate) async fn has_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(HAS_PURCHASE_SQL)
            .bind(buyer.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_file(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        file: NewProductFile,
    ) -> Result<ProductFileRecord, sqlx::Error> {
        let file_path = file.storage_path(product);
        let file_size = file.file_size.map(size_to_i64).transpose()?;

        query_as::<Postgres, ProductFileRecord>(INSERT_FILE_SQL)
            .bind(file.uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(file.file_name)
            .bind(file_path)
            .bind(file_size)
            .bind(file.file_type)
            .bind(file.is_preview)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_files(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductFileRecord>, sqlx::Error> {
        query_as::<Postgres, ProductFileRecord>(LIST_FILES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_file(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        file: ProductFileUuid,
    ) -> Result<ProductFileRecord, sqlx::Error> {
        query_as::<Postgres, ProductFileRecord>(DELETE_FILE_SQL)
            .bind(file.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

fn size_to_i64(size: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(size).map_err(|e| sqlx::Error::ColumnDecode {
        index: "file_size".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductFileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let file_size = row
            .try_get::<Option<i64>, _>("file_size")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "file_size".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductFileUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            file_name: row.try_get("file_name")?,
            file_path: row.try_get("file_path")?,
            file_size,
            file_type: row.try_get("file_type")?,
            is_preview: row.try_get("is_preview")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
