//! Products Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    products::{
        data::{NewProduct, Page, ProductUpdate},
        records::{
            CompatibilityTag, ProductCategory, ProductRecord, ProductStatus, ProductUuid,
        },
    },
    profiles::records::ProfileUuid,
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_FOR_UPDATE_SQL: &str = include_str!("sql/get_product_for_update.sql");
const GET_PUBLISHED_PRODUCT_SQL: &str = include_str!("sql/get_published_product.sql");
const GET_PUBLISHED_PRODUCT_BY_SLUG_SQL: &str =
    include_str!("sql/get_published_product_by_slug.sql");
const LIST_PUBLISHED_PRODUCTS_SQL: &str = include_str!("sql/list_published_products.sql");
const LIST_SELLER_PRODUCTS_SQL: &str = include_str!("sql/list_seller_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_PRODUCT_STATUS_SQL: &str = include_str!("sql/set_product_status.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const INCREMENT_PURCHASE_COUNT_SQL: &str = include_str!("sql/increment_purchase_count.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: ProfileUuid,
        slug: &str,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(seller.into_uuid())
            .bind(product.title)
            .bind(slug)
            .bind(product.description)
            .bind(product.short_description)
            .bind(product.category.as_str())
            .bind(product.license_type.as_str())
            .bind(tag_names(&product.compatibility_tags))
            .bind(price_to_i64(product.price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Locks the row until the transaction ends.
    pub(crate) async fn get_product_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_FOR_UPDATE_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_published_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PUBLISHED_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_published_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PUBLISHED_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_published_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
        category: Option<ProductCategory>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PUBLISHED_PRODUCTS_SQL)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .bind(category.map(ProductCategory::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_seller_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: ProfileUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_SELLER_PRODUCTS_SQL)
            .bind(seller.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.title)
            .bind(update.description)
            .bind(update.short_description)
            .bind(update.category.as_str())
            .bind(update.license_type.as_str())
            .bind(tag_names(&update.compatibility_tags))
            .bind(price_to_i64(update.price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_product_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        status: ProductStatus,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_STATUS_SQL)
            .bind(product.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn increment_purchase_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_PURCHASE_COUNT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn price_to_i64(price: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}

fn tag_names(tags: &[CompatibilityTag]) -> Vec<&'static str> {
    tags.iter().copied().map(CompatibilityTag::as_str).collect()
}

fn parse_column<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    row.try_get::<String, _>(column)?
        .parse::<T>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

fn column_to_u64(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let compatibility_tags = row
            .try_get::<Vec<String>, _>("compatibility_tags")?
            .iter()
            .map(|tag| tag.parse::<CompatibilityTag>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "compatibility_tags".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            seller_uuid: ProfileUuid::from_uuid(row.try_get("seller_uuid")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            short_description: row.try_get("short_description")?,
            category: parse_column(row, "category")?,
            license_type: parse_column(row, "license_type")?,
            compatibility_tags,
            price: column_to_u64(row, "price")?,
            currency: row.try_get("currency")?,
            status: parse_column(row, "status")?,
            purchase_count: column_to_u64(row, "purchase_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
