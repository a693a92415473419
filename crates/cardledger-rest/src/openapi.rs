//! OpenAPI documentation configuration.

use cardledger_core::{BalanceEntryId, CardId, ErrorResponse, FieldError, UserId};
use cardledger_service::{
    AddCreditCardRequest, BalanceEntryResponse, BalanceHistoryResponse, BalanceUpdateRequest,
    CardOwnerResponse, CardResponse, CreateUserRequest, UserListResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Cardledger API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cardledger API",
        version = "1.0.0",
        description = "CRUD backend for users and credit cards with per-day balance history",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::delete_user,
        // Credit-card endpoints
        crate::controllers::card_controller::add_card,
        crate::controllers::card_controller::list_user_cards,
        crate::controllers::card_controller::get_card_owner,
        crate::controllers::card_controller::get_balance_history,
        crate::controllers::card_controller::update_balances,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            UserId,
            CardId,
            BalanceEntryId,
            ErrorResponse,
            FieldError,
            // User DTOs
            CreateUserRequest,
            UserResponse,
            UserListResponse,
            // Card DTOs
            AddCreditCardRequest,
            CardResponse,
            CardOwnerResponse,
            BalanceUpdateRequest,
            BalanceEntryResponse,
            BalanceHistoryResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "credit-cards", description = "Credit-card and balance-history endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
