//! # inventory-domain
//!
//! Pure domain model for the inventory service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Products** (the single stored record type)
//! - Define the two write shapes: full replace and partial patch
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod product;
