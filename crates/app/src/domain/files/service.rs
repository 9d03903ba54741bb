//! Product files service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        files::{
            data::NewProductFile,
            errors::FilesServiceError,
            records::{ProductFileRecord, ProductFileUuid},
            repository::PgFilesRepository,
        },
        products::records::ProductUuid,
        profiles::records::ProfileUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgFilesService {
    db: Db,
    repository: PgFilesRepository,
}

impl PgFilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFilesRepository::new(),
        }
    }

    /// Products owned by someone else look the same as missing ones.
    async fn ensure_seller(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<(), FilesServiceError> {
        if self.repository.get_product_seller(tx, product).await? != seller {
            return Err(FilesServiceError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl FilesService for PgFilesService {
    async fn add_file(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
        file: NewProductFile,
    ) -> Result<ProductFileRecord, FilesServiceError> {
        let file = file.validated()?;

        let mut tx = self.db.begin().await?;

        self.ensure_seller(&mut tx, seller, product).await?;

        let created = self.repository.insert_file(&mut tx, product, file).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_seller_files(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductFileRecord>, FilesServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_seller(&mut tx, seller, product).await?;

        let files = self.repository.list_files(&mut tx, product).await?;

        tx.commit().await?;

        Ok(files)
    }

    async fn delete_file(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
        file: ProductFileUuid,
    ) -> Result<ProductFileRecord, FilesServiceError> {
        let mut tx = self.db.begin().await?;

        self.ensure_seller(&mut tx, seller, product).await?;

        let deleted = self.repository.delete_file(&mut tx, product, file).await?;

        tx.commit().await?;

        Ok(deleted)
    }

    async fn list_purchased_files(
        &self,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductFileRecord>, FilesServiceError> {
        let mut tx = self.db.begin().await?;

        let seller = self.repository.get_product_seller(&mut tx, product).await?;

        let allowed =
            seller == buyer || self.repository.has_purchase(&mut tx, buyer, product).await?;

        if !allowed {
            return Err(FilesServiceError::NotPurchased);
        }

        let files = self.repository.list_files(&mut tx, product).await?;

        tx.commit().await?;

        Ok(files)
    }
}

#[automock]
#[async_trait]
pub trait FilesService: Send + Sync {
    /// Attaches a file to a product owned by `seller`.
    ///
    /// The storage path is derived from the product and the file's uuid.
    async fn add_file(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
        file: NewProductFile,
    ) -> Result<ProductFileRecord, FilesServiceError>;

    /// Files attached to a product owned by `seller`, oldest first.
    async fn list_seller_files(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductFileRecord>, FilesServiceError>;

    /// Detaches a file and returns its record so the stored bytes can be removed.
    async fn delete_file(
        &self,
        seller: ProfileUuid,
        product: ProductUuid,
        file: ProductFileUuid,
    ) -> Result<ProductFileRecord, FilesServiceError>;

    /// Files of a product the caller has bought (or sells), oldest first.
    async fn list_purchased_files(
        &self,
        buyer: ProfileUuid,
        product: ProductUuid,
    ) -> Result<Vec<ProductFileRecord>, FilesServiceError>;
}
