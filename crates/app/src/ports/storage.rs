//! Storage port: repository trait for product persistence.

use std::future::Future;

use inventory_domain::error::InventoryError;
use inventory_domain::id::ProductId;
use inventory_domain::product::Product;

/// Repository for persisting and querying [`Product`]s.
pub trait ProductRepository {
    /// Get every stored product, in store iteration order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Product>, InventoryError>> + Send;

    /// Get a product by its unique identifier.
    fn find_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, InventoryError>> + Send;

    /// Insert the product when its id is unset, otherwise overwrite the
    /// record with that id (inserting it if missing).
    ///
    /// Returns the persisted state, always with `id` set.
    fn save(
        &self,
        product: Product,
    ) -> impl Future<Output = Result<Product, InventoryError>> + Send;

    /// Delete a product by its unique identifier. Deleting an absent id succeeds.
    fn delete_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<(), InventoryError>> + Send;
}
