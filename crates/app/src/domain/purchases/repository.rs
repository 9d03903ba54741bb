//! Purchases Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    products::records::ProductUuid,
    profiles::records::ProfileUuid,
    purchases::{
        data::NewPurchase,
        records::{PurchaseRecord, PurchaseUuid, SellerStats},
    },
};

const INSERT_PURCHASE_SQL: &str = include_str!("sql/insert_purchase.sql");
const FIND_PURCHASE_SQL: &str = include_str!("sql/find_purchase.sql");
const LIST_BUYER_PURCHASES_SQL: &str = include_str!("sql/list_buyer_purchases.sql");
const SELLER_STATS_SQL: &str = include_str!("sql/seller_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPurchasesRepository;

impl PgPurchasesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Returns `None` when the buyer already has a purchase for the product.
    pub(crate) async fn insert_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: NewPurchase,
    ) -> Result<Option<PurchaseRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(INSERT_PURCHASE_SQL)
            .bind(purchase.uuid.into_uuid())
            .bind(purchase.buyer_uuid.into_uuid())
            .bind(purchase.product_uuid.into_uuid())
            .bind(amount_to_i64("amount", purchase.split.amount())?)
            .bind(amount_to_i64("platform_fee", purchase.split.platform_fee())?)
            .bind(amount_to_i64(
                "seller_payout",
                purchase.split.seller_payout(),
            )?)
            .bind(purchase.payment_reference)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Option<PurchaseRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(FIND_PURCHASE_SQL)
            .bind(buyer.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_buyer_purchases(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: ProfileUuid,
    ) -> Result<Vec<PurchaseRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(LIST_BUYER_PURCHASES_SQL)
            .bind(buyer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn seller_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: ProfileUuid,
    ) -> Result<SellerStats, sqlx::Error> {
        let row = sqlx::query(SELLER_STATS_SQL)
            .bind(seller.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(SellerStats {
            total_products: column_to_u64(&row, "total_products")?,
            published_products: column_to_u64(&row, "published_products")?,
            total_sales: column_to_u64(&row, "total_sales")?,
            total_revenue: column_to_u64(&row, "total_revenue")?,
        })
    }
}

fn amount_to_i64(column: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
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

impl<'r> FromRow<'r, PgRow> for PurchaseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PurchaseUuid::from_uuid(row.try_get("uuid")?),
            buyer_uuid: ProfileUuid::from_uuid(row.try_get("buyer_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            amount: column_to_u64(row, "amount")?,
            platform_fee: column_to_u64(row, "platform_fee")?,
            seller_payout: column_to_u64(row, "seller_payout")?,
            payment_reference: row.try_get("payment_reference")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
