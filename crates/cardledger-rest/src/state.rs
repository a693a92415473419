//! Application state for Axum handlers.

use cardledger_service::{CardService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub card_service: Arc<dyn CardService>,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(user_service: Arc<dyn UserService>, card_service: Arc<dyn CardService>) -> Self {
        Self {
            user_service,
            card_service,
        }
    }
}
