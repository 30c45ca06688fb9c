//! Product Service - Business logic layer

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::{ProductRepository, ProductTransaction, TxAccess};

/// Product service providing business logic operations
///
/// Every call runs in exactly one transaction: committed when the call
/// succeeds, rolled back when it fails.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let mut tx = self.repository.begin(TxAccess::ReadOnly).await?;
        let result = tx.find_all().await;
        finish(tx, result).await
    }

    /// Get a product by ID; absence is not an error here
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let mut tx = self.repository.begin(TxAccess::ReadOnly).await?;
        let result = tx.find_by_id(id).await;
        finish(tx, result).await
    }

    /// Persist a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut tx = self.repository.begin(TxAccess::ReadWrite).await?;
        let result = tx.save(input).await;
        finish(tx, result).await
    }

    /// Replace name, price, description and stock of an existing product.
    ///
    /// Fails with [`ProductError::NotFound`] without writing anything when
    /// `id` does not exist. Any `id` carried by `incoming` is ignored.
    #[instrument(skip(self, incoming))]
    pub async fn update(&self, id: i64, incoming: ProductInput) -> ProductResult<Product> {
        let mut tx = self.repository.begin(TxAccess::ReadWrite).await?;
        let result = Self::merge_and_save(&mut tx, id, incoming).await;
        finish(tx, result).await
    }

    async fn merge_and_save(tx: &mut R::Tx, id: i64, incoming: ProductInput) -> ProductResult<Product> {
        let mut existing = tx.find_by_id(id).await?.ok_or(ProductError::NotFound(id))?;

        existing.name = incoming.name;
        existing.price = incoming.price;
        existing.description = incoming.description;
        existing.stock = incoming.stock;

        tx.save(ProductInput::from(existing)).await
    }

    /// Delete a product; deleting a missing id succeeds
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<()> {
        let mut tx = self.repository.begin(TxAccess::ReadWrite).await?;
        let result = tx.delete_by_id(id).await;
        finish(tx, result).await
    }

    /// Case-insensitive name search
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let mut tx = self.repository.begin(TxAccess::ReadOnly).await?;
        let result = tx.find_by_name_contains(name).await;
        finish(tx, result).await
    }

    /// Products priced within `[min, max]`
    #[instrument(skip(self))]
    pub async fn search_by_price_range(&self, min: Decimal, max: Decimal) -> ProductResult<Vec<Product>> {
        let mut tx = self.repository.begin(TxAccess::ReadOnly).await?;
        let result = tx.find_by_price_between(min, max).await;
        finish(tx, result).await
    }

    /// Products with stock above zero
    #[instrument(skip(self))]
    pub async fn search_in_stock(&self) -> ProductResult<Vec<Product>> {
        let mut tx = self.repository.begin(TxAccess::ReadOnly).await?;
        let result = tx.find_by_stock_greater_than(0).await;
        finish(tx, result).await
    }
}

/// Commit on success, roll back on failure. A failed rollback is logged and
/// the original error wins.
async fn finish<T, Tx: ProductTransaction>(tx: Tx, result: ProductResult<T>) -> ProductResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
