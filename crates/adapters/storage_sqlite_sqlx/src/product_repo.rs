//! `SQLite` implementation of [`ProductRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use inventory_app::ports::ProductRepository;
use inventory_domain::error::InventoryError;
use inventory_domain::id::ProductId;
use inventory_domain::product::Product;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Product`].
struct Wrapper(Product);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Product> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;

        Ok(Self(Product {
            id: Some(ProductId::new(id)),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            quantity: row.try_get("quantity")?,
            price: row.try_get("price")?,
        }))
    }
}

// A NULL id never conflicts, so the same statement inserts new rows and
// overwrites existing ones.
const UPSERT: &str = "INSERT INTO products (id, name, category, quantity, price) VALUES (?, ?, ?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, category = excluded.category, \
     quantity = excluded.quantity, price = excluded.price \
     RETURNING id";
const SELECT_BY_ID: &str = "SELECT * FROM products WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM products";
const DELETE_BY_ID: &str = "DELETE FROM products WHERE id = ?";

/// `SQLite`-backed product repository.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for SqliteProductRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<Product>, InventoryError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::query("list"))?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, InventoryError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::query("load"))?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn save(
        &self,
        mut product: Product,
    ) -> impl Future<Output = Result<Product, InventoryError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = sqlx::query_scalar::<_, i64>(UPSERT)
                .bind(product.id.map(ProductId::as_i64))
                .bind(&product.name)
                .bind(&product.category)
                .bind(product.quantity)
                .bind(product.price)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::query("save"))?;

            product.id = Some(ProductId::new(id));
            Ok(product)
        }
    }

    fn delete_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<(), InventoryError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::query("delete"))?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteProductRepository {
        let db = Config::new("sqlite::memory:").build().await.unwrap();
        SqliteProductRepository::new(db.pool().clone())
    }

    fn test_product() -> Product {
        Product::builder()
            .name("Stapler")
            .category("Office")
            .quantity(12)
            .price(4.5)
            .build()
    }

    #[tokio::test]
    async fn should_assign_id_and_retrieve_product_when_saving_new() {
        let repo = setup().await;

        let saved = repo.save(test_product()).await.unwrap();
        let id = saved.id.unwrap();

        let fetched = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, Product { id: Some(id), ..test_product() });
    }

    #[tokio::test]
    async fn should_assign_distinct_ids_when_saving_twice() {
        let repo = setup().await;
        let a = repo.save(test_product()).await.unwrap();
        let b = repo.save(test_product()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn should_return_none_when_product_not_found() {
        let repo = setup().await;
        let result = repo.find_by_id(ProductId::new(999)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_products() {
        let repo = setup().await;
        repo.save(test_product()).await.unwrap();
        repo.save(Product::builder().name("Paper").build())
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_overwrite_row_when_saving_with_existing_id() {
        let repo = setup().await;
        let mut product = repo.save(test_product()).await.unwrap();
        let id = product.id.unwrap();

        product.name = Some("Heavy Stapler".to_string());
        product.price = None;
        repo.save(product).await.unwrap();

        let fetched = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Heavy Stapler"));
        assert_eq!(fetched.price, None);
        assert_eq!(fetched.quantity, Some(12));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_roundtrip_all_null_attributes() {
        let repo = setup().await;
        let saved = repo.save(Product::default()).await.unwrap();

        let fetched = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
        assert!(fetched.name.is_none());
    }

    #[tokio::test]
    async fn should_delete_product_when_exists() {
        let repo = setup().await;
        let id = repo.save(test_product()).await.unwrap().id.unwrap();

        repo.delete_by_id(id).await.unwrap();

        let result = repo.find_by_id(id).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_succeed_when_deleting_missing_product() {
        let repo = setup().await;
        repo.delete_by_id(ProductId::new(42)).await.unwrap();
    }

    #[tokio::test]
    async fn should_not_reuse_id_of_deleted_product() {
        let repo = setup().await;
        let first = repo.save(test_product()).await.unwrap().id.unwrap();
        repo.delete_by_id(first).await.unwrap();

        let second = repo.save(test_product()).await.unwrap().id.unwrap();
        assert_ne!(first, second);
    }
}
