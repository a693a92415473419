//! Repository trait definitions.

use async_trait::async_trait;
use cardledger_core::{
    BalanceEntry, CardId, CreditCard, Interface, LedgerResult, Page, PageRequest, User, UserId,
};
use chrono::NaiveDate;

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> LedgerResult<Option<User>>;

    /// Finds all users with pagination.
    async fn find_all(&self, page: PageRequest) -> LedgerResult<Page<User>>;

    /// Checks if an email is already registered.
    async fn exists_by_email(&self, email: &str) -> LedgerResult<bool>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> LedgerResult<User>;

    /// Deletes a user by ID, returning whether a row was removed.
    async fn delete(&self, id: UserId) -> LedgerResult<bool>;

    /// Counts all users.
    async fn count(&self) -> LedgerResult<u64>;
}

/// Credit-card repository trait.
#[async_trait]
pub trait CreditCardRepository: Interface + Send + Sync {
    /// Finds a card by ID.
    async fn find_by_id(&self, id: CardId) -> LedgerResult<Option<CreditCard>>;

    /// Finds a card by its number.
    async fn find_by_number(&self, number: &str) -> LedgerResult<Option<CreditCard>>;

    /// Finds all cards belonging to a user.
    async fn find_by_user_id(&self, user_id: UserId) -> LedgerResult<Vec<CreditCard>>;

    /// Checks if a card number is already registered.
    async fn exists_by_number(&self, number: &str) -> LedgerResult<bool>;

    /// Saves a new card.
    async fn save(&self, card: &CreditCard) -> LedgerResult<CreditCard>;

    /// Deletes a card by ID, returning whether a row was removed.
    async fn delete(&self, id: CardId) -> LedgerResult<bool>;
}

/// Balance-history repository trait.
#[async_trait]
pub trait BalanceHistoryRepository: Interface + Send + Sync {
    /// Loads all balance entries for a card.
    async fn find_by_card_id(&self, card_id: CardId) -> LedgerResult<Vec<BalanceEntry>>;

    /// Finds the balance entry for a card on a specific date.
    async fn find_by_card_id_and_date(
        &self,
        card_id: CardId,
        date: NaiveDate,
    ) -> LedgerResult<Option<BalanceEntry>>;

    /// Upserts a card's balance entries in one transaction.
    ///
    /// Rows are keyed on `(credit_card_id, entry_date)`: an existing day's
    /// balance is updated in place and keeps its storage identity, a new
    /// day is inserted.
    async fn save_all(&self, entries: &[BalanceEntry]) -> LedgerResult<()>;
}
