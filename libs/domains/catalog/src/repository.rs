use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};

/// Whether a transaction may write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxAccess {
    ReadOnly,
    ReadWrite,
}

/// Entry point to product storage: every operation runs inside a transaction
/// obtained from [`begin`](ProductRepository::begin).
#[cfg_attr(test, mockall::automock(type Tx = MockProductTransaction;))]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    type Tx: ProductTransaction;

    async fn begin(&self, access: TxAccess) -> ProductResult<Self::Tx>;
}

/// Operations available inside an open transaction.
///
/// Dropping a transaction without calling [`commit`](ProductTransaction::commit)
/// discards its writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductTransaction: Send {
    /// All products, ordered by id
    async fn find_all(&mut self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&mut self, id: i64) -> ProductResult<Option<Product>>;

    /// Case-insensitive substring match on the name; `%` and `_` match literally
    async fn find_by_name_contains(&mut self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// Inclusive on both ends; `min > max` yields nothing
    async fn find_by_price_between(&mut self, min: Decimal, max: Decimal) -> ProductResult<Vec<Product>>;

    async fn find_by_stock_greater_than(&mut self, threshold: i32) -> ProductResult<Vec<Product>>;

    /// Overwrite the row named by `input.id` if it exists, otherwise insert
    /// with a storage-assigned id.
    async fn save(&mut self, input: ProductInput) -> ProductResult<Product>;

    /// No-op when the row does not exist
    async fn delete_by_id(&mut self, id: i64) -> ProductResult<()>;

    async fn commit(self) -> ProductResult<()>;

    async fn rollback(self) -> ProductResult<()>;
}

#[derive(Debug, Clone, Default)]
struct InMemoryState {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Read-only transactions share a read lock. A read-write transaction holds
/// the write lock and works on a copy that replaces the shared state on commit.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    type Tx = InMemoryTransaction;

    async fn begin(&self, access: TxAccess) -> ProductResult<InMemoryTransaction> {
        let inner = match access {
            TxAccess::ReadOnly => TxState::ReadOnly(self.state.clone().read_owned().await),
            TxAccess::ReadWrite => {
                let guard = self.state.clone().write_owned().await;
                let staged = guard.clone();
                TxState::ReadWrite { guard, staged }
            }
        };

        Ok(InMemoryTransaction { inner })
    }
}

pub struct InMemoryTransaction {
    inner: TxState,
}

enum TxState {
    ReadOnly(OwnedRwLockReadGuard<InMemoryState>),
    ReadWrite {
        guard: OwnedRwLockWriteGuard<InMemoryState>,
        staged: InMemoryState,
    },
}

impl InMemoryTransaction {
    fn view(&self) -> &InMemoryState {
        match &self.inner {
            TxState::ReadOnly(guard) => &**guard,
            TxState::ReadWrite { staged, .. } => staged,
        }
    }

    fn staged_mut(&mut self) -> ProductResult<&mut InMemoryState> {
        match &mut self.inner {
            TxState::ReadOnly(_) => Err(ProductError::Internal(
                "Write attempted in a read-only transaction".to_string(),
            )),
            TxState::ReadWrite { staged, .. } => Ok(staged),
        }
    }

    fn select(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.view()
            .rows
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductTransaction for InMemoryTransaction {
    async fn find_all(&mut self) -> ProductResult<Vec<Product>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_id(&mut self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.view().rows.get(&id).cloned())
    }

    async fn find_by_name_contains(&mut self, fragment: &str) -> ProductResult<Vec<Product>> {
        let needle = fragment.to_lowercase();
        Ok(self.select(|p| p.name.to_lowercase().contains(&needle)))
    }

    async fn find_by_price_between(&mut self, min: Decimal, max: Decimal) -> ProductResult<Vec<Product>> {
        Ok(self.select(|p| min <= p.price && p.price <= max))
    }

    async fn find_by_stock_greater_than(&mut self, threshold: i32) -> ProductResult<Vec<Product>> {
        Ok(self.select(|p| p.stock > threshold))
    }

    async fn save(&mut self, input: ProductInput) -> ProductResult<Product> {
        let state = self.staged_mut()?;

        let existing_id = input.id.filter(|id| state.rows.contains_key(id));
        let id = match existing_id {
            Some(id) => id,
            None => {
                state.last_id += 1;
                state.last_id
            }
        };

        let product = Product {
            id,
            name: input.name,
            price: input.price,
            description: input.description,
            stock: input.stock,
        };
        state.rows.insert(id, product.clone());

        if existing_id.is_some() {
            tracing::info!(product_id = id, "Updated product");
        } else {
            tracing::info!(product_id = id, "Created product");
        }
        Ok(product)
    }

    async fn delete_by_id(&mut self, id: i64) -> ProductResult<()> {
        let state = self.staged_mut()?;
        if state.rows.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }

    async fn commit(self) -> ProductResult<()> {
        if let TxState::ReadWrite { mut guard, staged } = self.inner {
            *guard = staged;
        }
        Ok(())
    }

    async fn rollback(self) -> ProductResult<()> {
        Ok(())
    }
}
