//! Purchases service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        profiles::records::ProfileUuid,
        purchases::{
            data::NewPurchase,
            errors::PurchasesServiceError,
            records::{PurchaseInsert, PurchaseRecord, SellerStats},
            repository::PgPurchasesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPurchasesService {
    db: Db,
    repository: PgPurchasesRepository,
}

impl PgPurchasesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPurchasesRepository::new(),
        }
    }
}

#[async_trait]
impl PurchasesService for PgPurchasesService {
    async fn find_purchase(
        &self,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Option<PurchaseRecord>, PurchasesServiceError> {
        let mut tx = self.db.begin().await?;

        let purchase = self
            .repository
            .find_purchase(&mut tx, buyer, product)
            .await?;

        tx.commit().await?;

        Ok(purchase)
    }

    async fn record_purchase(
        &self,
        purchase: NewPurchase,
    ) -> Result<PurchaseInsert, PurchasesServiceError> {
        let mut tx = self.db.begin().await?;

        let inserted = self.repository.insert_purchase(&mut tx, purchase).await?;

        tx.commit().await?;

        Ok(match inserted {
            Some(record) => PurchaseInsert::Created(record),
            None => PurchaseInsert::AlreadyRecorded,
        })
    }

    async fn list_buyer_purchases(
        &self,
        buyer: ProfileUuid,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        let mut tx = self.db.begin().await?;

        let purchases = self
            .repository
            .list_buyer_purchases(&mut tx, buyer)
            .await?;

        tx.commit().await?;

        Ok(purchases)
    }

    async fn seller_stats(
        &self,
        seller: ProfileUuid,
    ) -> Result<SellerStats, PurchasesServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.seller_stats(&mut tx, seller).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// The buyer's purchase of `product`, if any.
    async fn find_purchase(
        &self,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Option<PurchaseRecord>, PurchasesServiceError>;

    /// Records a purchase at most once per buyer and product.
    ///
    /// A second call for the same pair leaves the stored row untouched and
    /// returns [`PurchaseInsert::AlreadyRecorded`].
    async fn record_purchase(
        &self,
        purchase: NewPurchase,
    ) -> Result<PurchaseInsert, PurchasesServiceError>;

    async fn list_buyer_purchases(
        &self,
        buyer: ProfileUuid,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError>;

    async fn seller_stats(&self, seller: ProfileUuid)
    -> Result<SellerStats, PurchasesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            fees::FeeSplit, profiles::records::SellerTier, purchases::records::PurchaseUuid,
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn record_purchase_stores_split() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_onboarded_seller(SellerTier::Free).await;
        let buyer = ctx.create_profile(SellerTier::Free).await;
        let product = ctx.create_published_product(&seller, 2900).await;

        let split = FeeSplit::for_tier(product.price, seller.seller_tier);
        let inserted = ctx
            .purchases
            .record_purchase(NewPurchase::new(buyer.uuid, product.uuid, split, "pi_1"))
            .await?;

        let PurchaseInsert::Created(record) = inserted else {
            panic!("expected Created, got {inserted:?}");
        };

        assert_eq!(record.amount, 2900);
        assert_eq!(record.platform_fee, 580);
        assert_eq!(record.seller_payout, 2320);
        assert_eq!(record.payment_reference, "pi_1");

        let found = ctx.purchases.find_purchase(buyer.uuid, product.uuid).await?;

        assert_eq!(found, Some(record));

        Ok(())
    }

    #[tokio::test]
    async fn record_purchase_twice_keeps_first_row() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_onboarded_seller(SellerTier::Team).await;
        let buyer = ctx.create_profile(SellerTier::Free).await;
        let product = ctx.create_published_product(&seller, 2900).await;
        let split = FeeSplit::for_tier(product.price, seller.seller_tier);

        let first = ctx
            .purchases
            .record_purchase(NewPurchase::new(buyer.uuid, product.uuid, split, "pi_a"))
            .await?;

        let second = ctx
            .purchases
            .record_purchase(NewPurchase::new(buyer.uuid, product.uuid, split, "pi_b"))
            .await?;

        assert!(matches!(first, PurchaseInsert::Created(_)));
        assert_eq!(second, PurchaseInsert::AlreadyRecorded);

        let purchases = ctx.purchases.list_buyer_purchases(buyer.uuid).await?;

        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].payment_reference, "pi_a");

        Ok(())
    }

    #[tokio::test]
    async fn overlapping_records_create_one_row() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_onboarded_seller(SellerTier::Free).await;
        let buyer = ctx.create_profile(SellerTier::Free).await;
        let product = ctx.create_published_product(&seller, 2900).await;
        let split = FeeSplit::for_tier(product.price, seller.seller_tier);

        let (first, second) = tokio::join!(
            ctx.purchases
                .record_purchase(NewPurchase::new(buyer.uuid, product.uuid, split, "pi_a")),
            ctx.purchases
                .record_purchase(NewPurchase::new(buyer.uuid, product.uuid, split, "pi_b")),
        );

        let outcomes = [first?, second?];
        let created = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, PurchaseInsert::Created(_)))
            .count();
        let skipped = outcomes
            .iter()
            .filter(|outcome| **outcome == PurchaseInsert::AlreadyRecorded)
            .count();

        assert_eq!((created, skipped), (1, 1));
        assert_eq!(
            ctx.purchases.list_buyer_purchases(buyer.uuid).await?.len(),
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn mismatched_split_violates_check() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_onboarded_seller(SellerTier::Free).await;
        let buyer = ctx.create_profile(SellerTier::Free).await;
        let product = ctx.create_published_product(&seller, 2900).await;

        let result = sqlx::query(
            "INSERT INTO purchases \
             (uuid, buyer_uuid, product_uuid, amount, platform_fee, seller_payout, payment_reference) \
             VALUES ($1, $2, $3, 2900, 580, 2000, 'pi_bad')",
        )
        .bind(PurchaseUuid::new().into_uuid())
        .bind(buyer.uuid.into_uuid())
        .bind(product.uuid.into_uuid())
        .execute(ctx.db.pool())
        .await;

        let Err(error) = result else {
            panic!("mismatched split was stored");
        };

        assert!(
            matches!(
                PurchasesServiceError::from(error),
                PurchasesServiceError::InvalidData
            ),
            "expected a check violation"
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_purchase_returns_none_when_not_owned() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_onboarded_seller(SellerTier::Free).await;
        let buyer = ctx.create_profile(SellerTier::Free).await;
        let product = ctx.create_published_product(&seller, 2900).await;

        let found = ctx.purchases.find_purchase(buyer.uuid, product.uuid).await?;

        assert_eq!(found, None);

        Ok(())
    }

    #[tokio::test]
    async fn record_purchase_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_profile(SellerTier::Free).await;

        let result = ctx
            .purchases
            .record_purchase(NewPurchase::new(
                buyer.uuid,
                ProductUuid::new(),
                FeeSplit::for_tier(2900, SellerTier::Free),
                "pi_missing",
            ))
            .await;

        assert!(
            matches!(result, Err(PurchasesServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn seller_stats_sums_payouts() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_onboarded_seller(SellerTier::Pro).await;
        let product = ctx.create_published_product(&seller, 2900).await;
        let split = FeeSplit::for_tier(product.price, seller.seller_tier);

        for _ in 0..2 {
            let buyer = ctx.create_profile(SellerTier::Free).await;

            ctx.purchases
                .record_purchase(NewPurchase::new(buyer.uuid, product.uuid, split, "pi"))
                .await?;
        }

        let stats = ctx.purchases.seller_stats(seller.uuid).await?;

        assert_eq!(
            stats,
            SellerStats {
                total_products: 1,
                published_products: 1,
                total_sales: 2,
                total_revenue: 2 * 2552,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn seller_stats_without_sales_is_zero() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_profile(SellerTier::Free).await;

        let stats = ctx.purchases.seller_stats(seller.uuid).await?;

        assert_eq!(stats, SellerStats::default());

        Ok(())
    }
}
