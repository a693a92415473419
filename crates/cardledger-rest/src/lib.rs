//! # Cardledger REST
//!
//! REST API layer built on Axum: controllers, router, response envelope,
//! request logging, and OpenAPI documentation.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
