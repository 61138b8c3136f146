//! # inventory-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   - `ProductRepository`: find, save, delete products
//! - Define the **driving/inbound** use-case struct:
//!   - `ProductService`: list, get, create, replace, patch, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `inventory-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
