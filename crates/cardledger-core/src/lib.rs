//! # Cardledger Core
//!
//! Core types, error definitions, and domain logic for Cardledger.
//! This crate provides the foundational abstractions used across all layers,
//! including the balance-history aggregate that keeps a card's per-day
//! balance series dense and applies dated corrections.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
