//! Credit-card service trait definition.

use crate::dto::{
    AddCreditCardRequest, BalanceHistoryResponse, BalanceUpdateRequest, CardOwnerResponse,
    CardResponse,
};
use async_trait::async_trait;
use cardledger_core::{Interface, LedgerResult, UserId};

/// Credit-card service trait.
#[async_trait]
pub trait CardService: Interface + Send + Sync {
    /// Adds a credit card to a user.
    async fn add_card(&self, request: AddCreditCardRequest) -> LedgerResult<CardResponse>;

    /// Lists all cards belonging to a user.
    async fn list_user_cards(&self, user_id: UserId) -> LedgerResult<Vec<CardResponse>>;

    /// Looks up the owning user of a card number.
    async fn get_card_owner(&self, card_number: &str) -> LedgerResult<CardOwnerResponse>;

    /// Returns a card's balance history, date ascending.
    async fn get_balance_history(&self, card_number: &str) -> LedgerResult<BalanceHistoryResponse>;

    /// Applies an ordered batch of balance corrections.
    ///
    /// For each request in caller order: resolve the card by number, load
    /// its history, densify it (gap-filling missing days), apply the dated
    /// correction, and persist the result — then move to the next request.
    ///
    /// The first unresolved card number aborts the batch; updates already
    /// persisted for earlier requests stay committed (there is no enclosing
    /// transaction). A correction whose date falls outside the card's known
    /// range is dropped without error. Concurrent batches touching the same
    /// card race read-modify-write; the last writer wins.
    async fn update_balances(&self, requests: Vec<BalanceUpdateRequest>) -> LedgerResult<()>;
}
