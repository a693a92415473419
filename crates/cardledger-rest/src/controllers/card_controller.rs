//! Credit-card controller, including the batch balance-update endpoint.

use crate::{
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cardledger_core::{LedgerError, UserId};
use cardledger_service::{
    AddCreditCardRequest, BalanceHistoryResponse, BalanceUpdateRequest, CardOwnerResponse,
    CardResponse,
};
use tracing::debug;

/// Creates the credit-card router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_card))
        .route("/user/:user_id", get(list_user_cards))
        .route("/:number/owner", get(get_card_owner))
        .route("/:number/history", get(get_balance_history))
        .route("/update-balance", post(update_balances))
}

/// Add a credit card to a user.
#[utoipa::path(
    post,
    path = "/credit-cards",
    tag = "credit-cards",
    request_body = AddCreditCardRequest,
    responses(
        (status = 201, description = "Card created", body = CardResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Card number already registered")
    )
)]
pub async fn add_card(
    State(state): State<AppState>,
    Json(request): Json<AddCreditCardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CardResponse>>), AppError> {
    debug!("Add card request for user: {}", request.user_id);

    let response = state.card_service.add_card(request).await?;
    Ok(created(response))
}

/// List all cards of a user.
#[utoipa::path(
    get,
    path = "/credit-cards/user/{user_id}",
    tag = "credit-cards",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's cards", body = [CardResponse]),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_cards(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<CardResponse>> {
    debug!("List cards request for user: {}", user_id);

    let user_id = parse_user_id(&user_id)?;
    let response = state.card_service.list_user_cards(user_id).await?;
    ok(response)
}

/// Look up the owning user of a card number.
#[utoipa::path(
    get,
    path = "/credit-cards/{number}/owner",
    tag = "credit-cards",
    params(("number" = String, Path, description = "Card number")),
    responses(
        (status = 200, description = "The owning user", body = CardOwnerResponse),
        (status = 404, description = "Card not found")
    )
)]
pub async fn get_card_owner(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<CardOwnerResponse> {
    debug!("Card owner lookup request");

    let response = state.card_service.get_card_owner(&number).await?;
    ok(response)
}

/// Get a card's balance history, date ascending.
#[utoipa::path(
    get,
    path = "/credit-cards/{number}/history",
    tag = "credit-cards",
    params(("number" = String, Path, description = "Card number")),
    responses(
        (status = 200, description = "The card's balance history", body = BalanceHistoryResponse),
        (status = 404, description = "Card not found")
    )
)]
pub async fn get_balance_history(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<BalanceHistoryResponse> {
    debug!("Balance history request");

    let response = state.card_service.get_balance_history(&number).await?;
    ok(response)
}

/// Apply an ordered batch of balance corrections.
///
/// Requests are processed in order, one card at a time. The first unknown
/// card number aborts the batch; updates already persisted for earlier
/// requests stay committed.
#[utoipa::path(
    post,
    path = "/credit-cards/update-balance",
    tag = "credit-cards",
    request_body = [BalanceUpdateRequest],
    responses(
        (status = 204, description = "All updates applied"),
        (status = 400, description = "Malformed request in batch"),
        (status = 404, description = "Unknown card number; earlier updates remain committed")
    )
)]
pub async fn update_balances(
    State(state): State<AppState>,
    Json(requests): Json<Vec<BalanceUpdateRequest>>,
) -> Result<StatusCode, AppError> {
    debug!("Balance update batch of {} requests", requests.len());

    state.card_service.update_balances(requests).await?;
    Ok(no_content())
}

/// Helper to parse a user ID from a path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(LedgerError::Validation(format!("Invalid user ID: {}", id))))
}
