//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, Page, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductCategory, ProductRecord, ProductStatus, ProductUuid},
            repository::PgProductsRepository,
            slug::unique_slug,
        },
        profiles::records::ProfileUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    /// Lock `product` for the rest of `tx`, hiding it from anyone but its seller.
    async fn owned_product_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let record = self.repository.get_product_for_update(tx, product).await?;

        if record.seller_uuid != seller {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(record)
    }

    async fn transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &ProductRecord,
        next: ProductStatus,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !record.status.can_transition_to(next) {
            return Err(ProductsServiceError::InvalidStatusTransition {
                from: record.status,
                to: next,
            });
        }

        let updated = self
            .repository
            .set_product_status(tx, record.uuid, next)
            .await?;

        Ok(updated)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn create_product(
        &self,
        seller: ProfileUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.validated()?;
        let slug = unique_slug(&product.title);

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, seller, &slug, product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_published_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .get_published_product(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_published_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .get_published_product_by_slug(&mut tx, slug)
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_published_products(
        &self,
        page: Page,
        category: Option<ProductCategory>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_published_products(&mut tx, page, category)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_seller_products(
        &self,
        seller: ProfileUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_seller_products(&mut tx, seller)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn update_product(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let existing = self
            .owned_product_for_update(&mut tx, seller, product)
            .await?;

        if !existing.status.is_pre_publish() {
            return Err(ProductsServiceError::Locked(existing.status));
        }

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .owned_product_for_update(&mut tx, seller, product)
            .await?;

        if !existing.status.is_pre_publish() {
            return Err(ProductsServiceError::Locked(existing.status));
        }

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn submit_for_review(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .owned_product_for_update(&mut tx, seller, product)
            .await?;

        let updated = self
            .transition(&mut tx, &existing, ProductStatus::InReview)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn publish_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .get_product_for_update(&mut tx, product)
            .await?;

        let updated = self
            .transition(&mut tx, &existing, ProductStatus::Published)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn archive_product(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .owned_product_for_update(&mut tx, seller, product)
            .await?;

        let updated = self
            .transition(&mut tx, &existing, ProductStatus::Archived)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn increment_purchase_count(
        &self,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .increment_purchase_count(&mut tx, product)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a draft listing owned by `seller`.
    async fn create_product(
        &self,
        seller: ProfileUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single product regardless of status.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a product only if it is published.
    async fn get_published_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a published product by its public slug.
    async fn get_published_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Published products, newest first, optionally narrowed to one category.
    async fn list_published_products(
        &self,
        page: Page,
        category: Option<ProductCategory>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Every product owned by `seller`, newest first.
    async fn list_seller_products(
        &self,
        seller: ProfileUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Replaces the listing content of a pre-publish product.
    async fn update_product(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a pre-publish product.
    async fn delete_product(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    async fn submit_for_review(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Approves a product that is in review.
    async fn publish_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    async fn archive_product(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Adds one to the denormalised sales counter.
    async fn increment_purchase_count(&self, product: ProductUuid)
    -> Result<(), ProductsServiceError>;
}
