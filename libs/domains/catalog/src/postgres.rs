use async_trait::async_trait;
use database::{DatabaseError, DatabaseResult};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, NotSet, QueryFilter, QueryOrder, Select, Set,
    TransactionTrait,
};

use crate::entity::{self, ActiveModel, Column, Entity};
use crate::error::ProductResult;
use crate::models::{Product, ProductInput};
use crate::repository::{ProductRepository, ProductTransaction, TxAccess};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    type Tx = PgProductTransaction;

    async fn begin(&self, access: TxAccess) -> ProductResult<PgProductTransaction> {
        let mode = match access {
            TxAccess::ReadOnly => AccessMode::ReadOnly,
            TxAccess::ReadWrite => AccessMode::ReadWrite,
        };

        let txn = self.db.begin_with_config(None, Some(mode)).await?;
        Ok(PgProductTransaction { txn })
    }
}

/// A SeaORM transaction at PostgreSQL's default READ COMMITTED isolation
pub struct PgProductTransaction {
    txn: DatabaseTransaction,
}

impl PgProductTransaction {
    async fn fetch(&self, query: Select<Entity>) -> ProductResult<Vec<Product>> {
        let models = query.order_by_asc(Column::Id).all(&self.txn).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ProductTransaction for PgProductTransaction {
    async fn find_all(&mut self) -> ProductResult<Vec<Product>> {
        self.fetch(Entity::find()).await
    }

    async fn find_by_id(&mut self, id: i64) -> ProductResult<Option<Product>> {
        let model = Entity::find_by_id(id).one(&self.txn).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name_contains(&mut self, fragment: &str) -> ProductResult<Vec<Product>> {
        self.fetch(Entity::find().filter(name_contains(fragment))).await
    }

    async fn find_by_price_between(&mut self, min: Decimal, max: Decimal) -> ProductResult<Vec<Product>> {
        self.fetch(Entity::find().filter(Column::Price.between(min, max)))
            .await
    }

    async fn find_by_stock_greater_than(&mut self, threshold: i32) -> ProductResult<Vec<Product>> {
        self.fetch(Entity::find().filter(Column::Stock.gt(threshold)))
            .await
    }

    async fn save(&mut self, input: ProductInput) -> ProductResult<Product> {
        let existing = match input.id {
            Some(id) => Entity::find_by_id(id).one(&self.txn).await?,
            None => None,
        };

        let model = match existing {
            Some(row) => {
                let mut active: ActiveModel = row.into();
                active.name = Set(input.name);
                active.price = Set(input.price);
                active.description = Set(input.description);
                active.stock = Set(input.stock);
                let model = active.update(&self.txn).await?;
                tracing::info!(product_id = model.id, "Updated product");
                model
            }
            None => {
                let active = ActiveModel {
                    id: NotSet,
                    name: Set(input.name),
                    price: Set(input.price),
                    description: Set(input.description),
                    stock: Set(input.stock),
                };
                let model = active.insert(&self.txn).await?;
                tracing::info!(product_id = model.id, "Created product");
                model
            }
        };

        Ok(model.into())
    }

    async fn delete_by_id(&mut self, id: i64) -> ProductResult<()> {
        let result = Entity::delete_by_id(id).exec(&self.txn).await?;
        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }

    async fn commit(self) -> ProductResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> ProductResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

/// Create the products table if it does not exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.execute_unprepared(entity::CREATE_TABLE_SQL)
        .await
        .map_err(|e| DatabaseError::SchemaError(format!("products table: {}", e)))?;

    tracing::info!("Products table ready");
    Ok(())
}

/// Both sides are folded by PostgreSQL so one collation applies to each.
fn name_contains(fragment: &str) -> impl IntoCondition {
    let pattern = format!("%{}%", escape_like(fragment));
    Expr::cust_with_values(
        "LOWER(name) LIKE LOWER($1) ESCAPE $2",
        [pattern, LIKE_ESCAPE.to_string()],
    )
}

const LIKE_ESCAPE: char = '\\';

/// Prefix LIKE metacharacters with [`LIKE_ESCAPE`].
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value, Values};

    fn row(id: i64, name: &str, cents: i64, stock: i32) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            description: None,
            stock,
        }
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("widget"), "widget");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    /// Read-only transaction over a mock that answers one empty SELECT
    async fn search_tx() -> (DatabaseConnection, PgProductTransaction) {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let tx = PgProductRepository::new(db.clone())
            .begin(TxAccess::ReadOnly)
            .await
            .unwrap();
        (db, tx)
    }

    /// The one SELECT recorded by the mock
    fn only_select(db: DatabaseConnection) -> Statement {
        let mut selects: Vec<Statement> = db
            .into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().to_vec())
            .filter(|stmt| stmt.sql.starts_with("SELECT"))
            .collect();
        assert_eq!(selects.len(), 1);
        selects.remove(0)
    }

    fn bound(values: impl IntoIterator<Item = Value>) -> Option<Values> {
        Some(Values(values.into_iter().collect()))
    }

    #[tokio::test]
    async fn test_name_search_binds_escaped_pattern() {
        let (db, mut tx) = search_tx().await;
        assert!(tx.find_by_name_contains("Wi_d%").await.unwrap().is_empty());
        tx.commit().await.unwrap();

        let stmt = only_select(db);
        assert!(
            stmt.sql.contains("WHERE LOWER(name) LIKE LOWER($1) ESCAPE $2"),
            "{}",
            stmt.sql
        );
        assert!(stmt.sql.contains("ORDER BY"));
        assert_eq!(
            stmt.values,
            bound(["%Wi\\_d\\%%".into(), "\\".into()])
        );
    }

    #[tokio::test]
    async fn test_price_search_binds_decimal_bounds() {
        let (db, mut tx) = search_tx().await;
        tx.find_by_price_between(Decimal::ONE, Decimal::TEN).await.unwrap();
        tx.commit().await.unwrap();

        let stmt = only_select(db);
        assert!(stmt.sql.contains("BETWEEN $1 AND $2"), "{}", stmt.sql);
        assert_eq!(stmt.values, bound([Decimal::ONE.into(), Decimal::TEN.into()]));
    }

    #[tokio::test]
    async fn test_stock_search_binds_threshold() {
        let (db, mut tx) = search_tx().await;
        tx.find_by_stock_greater_than(0).await.unwrap();
        tx.commit().await.unwrap();

        let stmt = only_select(db);
        assert!(stmt.sql.contains("\"stock\" > $1"), "{}", stmt.sql);
        assert_eq!(stmt.values, bound([0i32.into()]));
    }

    #[tokio::test]
    async fn test_find_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Widget", 999, 5), row(2, "Gadget", 1999, 0)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut tx = repo.begin(TxAccess::ReadOnly).await.unwrap();
        let products = tx.find_all().await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Decimal::new(999, 2));
        assert_eq!(products[1].name, "Gadget");
    }

    #[tokio::test]
    async fn test_save_without_id_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Widget", 999, 5)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut tx = repo.begin(TxAccess::ReadWrite).await.unwrap();
        let saved = tx
            .save(ProductInput {
                id: None,
                name: "Widget".to_string(),
                price: Decimal::new(999, 2),
                description: None,
                stock: 5,
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(saved.id, 1);
        assert_eq!(saved.stock, 5);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut tx = repo.begin(TxAccess::ReadWrite).await.unwrap();
        assert!(tx.delete_by_id(404).await.is_ok());
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_database_failure_is_internal_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("relation \"products\" does not exist".to_string())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let mut tx = repo.begin(TxAccess::ReadOnly).await.unwrap();
        let err = tx.find_by_id(1).await.unwrap_err();
        assert!(err.to_string().contains("Database error"));
    }
}
