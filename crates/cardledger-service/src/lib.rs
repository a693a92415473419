//! # Cardledger Service
//!
//! Business logic layer: DTOs, service traits, and implementations.
//! The card service owns the batch balance-update orchestration
//! (gap-filling and delta propagation over a card's history).

pub mod card_service;
pub mod dto;
pub mod user_service;
mod r#impl;

pub use card_service::CardService;
pub use dto::*;
pub use r#impl::{CardServiceImpl, UserServiceImpl};
pub use user_service::UserService;
