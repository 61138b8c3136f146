//! The single record type held by the inventory store.
//!
//! Every attribute is nullable: a full replace copies absent values as
//! `None`, while a [`ProductPatch`] only touches the fields it carries.

use serde::{Deserialize, Serialize};

use crate::id::ProductId;

/// A stocked product.
///
/// `id` is `None` until the store assigns one on first save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl Product {
    /// Create a builder for constructing a [`Product`].
    #[must_use]
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    /// Overwrite all four attributes with those of `other`, including
    /// clearing the ones `other` leaves unset. The id is kept.
    pub fn replace_with(&mut self, other: Product) {
        self.name = other.name;
        self.category = other.category;
        self.quantity = other.quantity;
        self.price = other.price;
    }

    /// Overwrite only the attributes carried by `patch`. The id is kept.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = Some(quantity);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
    }
}

/// The set of attributes a caller supplied for a partial update.
///
/// A key that is missing or `null` in the incoming JSON is not supplied.
/// An empty string or a zero is a supplied value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl ProductPatch {
    /// `true` when the patch carries no attribute at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }
}

/// Step-by-step builder for [`Product`].
#[derive(Debug, Default)]
pub struct ProductBuilder {
    inner: Product,
}

impl ProductBuilder {
    #[must_use]
    pub fn id(mut self, id: ProductId) -> Self {
        self.inner.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.inner.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.inner.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.inner.price = Some(price);
        self
    }

    /// Consume the builder and return the [`Product`].
    #[must_use]
    pub fn build(self) -> Product {
        self.inner
    }
}
