//! Use-cases for managing the product catalogue.

use inventory_domain::error::{InventoryError, NotFoundError};
use inventory_domain::id::ProductId;
use inventory_domain::product::{Product, ProductPatch};

use crate::ports::ProductRepository;

/// Application service for product CRUD operations.
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_products(&self) -> Result<Vec<Product>, InventoryError> {
        self.repo.find_all().await
    }

    /// Look up a product by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no product with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Product",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Store a new product. Any id carried by `product` is discarded so the
    /// store always assigns a fresh one.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, product), fields(product_name = ?product.name))]
    pub async fn create_product(&self, mut product: Product) -> Result<Product, InventoryError> {
        product.id = None;
        let created = self.repo.save(product).await?;
        tracing::info!(id = ?created.id, "product created");
        Ok(created)
    }

    /// Replace every attribute of an existing product with the values in
    /// `details`. Attributes left unset in `details` are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no product with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, details))]
    pub async fn replace_product(
        &self,
        id: ProductId,
        details: Product,
    ) -> Result<Product, InventoryError> {
        let mut product = self.get_product(id).await?;
        product.replace_with(details);
        self.repo.save(product).await
    }

    /// Update only the attributes supplied in `patch`. A patch that carries
    /// nothing returns the stored product without writing.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] when no product with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn patch_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, InventoryError> {
        let mut product = self.get_product(id).await?;
        if patch.is_empty() {
            tracing::debug!("empty patch, nothing to save");
            return Ok(product);
        }
        product.apply_patch(patch);
        self.repo.save(product).await
    }

    /// Delete a product by id. Deleting an id that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), InventoryError> {
        self.repo.delete_by_id(id).await
    }
}
