//! Credit-card service implementation, including the batch balance updater.

use crate::card_service::CardService;
use crate::dto::{
    AddCreditCardRequest, BalanceEntryResponse, BalanceHistoryResponse, BalanceUpdateRequest,
    CardOwnerResponse, CardResponse,
};
use async_trait::async_trait;
use cardledger_core::{
    rules, BalanceHistory, CreditCard, LedgerError, LedgerResult, UserId, ValidateExt,
};
use cardledger_repository::{BalanceHistoryRepository, CreditCardRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Credit-card service implementation.
#[derive(Component)]
#[shaku(interface = CardService)]
pub struct CardServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    card_repository: Arc<dyn CreditCardRepository>,
    #[shaku(inject)]
    balance_repository: Arc<dyn BalanceHistoryRepository>,
}

impl CardServiceImpl {
    /// Creates a new card service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        card_repository: Arc<dyn CreditCardRepository>,
        balance_repository: Arc<dyn BalanceHistoryRepository>,
    ) -> Self {
        Self {
            user_repository,
            card_repository,
            balance_repository,
        }
    }

    /// Resolves a card by number or fails with `NotFound`.
    async fn resolve_card(&self, number: &str) -> LedgerResult<CreditCard> {
        self.card_repository
            .find_by_number(number)
            .await?
            .ok_or_else(|| LedgerError::not_found("CreditCard", number))
    }
}

#[async_trait]
impl CardService for CardServiceImpl {
    async fn add_card(&self, request: AddCreditCardRequest) -> LedgerResult<CardResponse> {
        debug!("Adding card for user: {}", request.user_id);

        request.validate_request()?;
        rules::valid_card_number(&request.card_number)
            .map_err(|_| LedgerError::validation("Card number must be 8-19 digits"))?;

        self.user_repository
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("User", request.user_id))?;

        if self
            .card_repository
            .exists_by_number(&request.card_number)
            .await?
        {
            return Err(LedgerError::Conflict(format!(
                "Card number '{}' already registered",
                request.card_number
            )));
        }

        let card = CreditCard::new(request.user_id, request.card_number, request.issuance_bank);
        let saved_card = self.card_repository.save(&card).await?;

        info!("Card created: {}", saved_card.id);
        Ok(CardResponse::from(saved_card))
    }

    async fn list_user_cards(&self, user_id: UserId) -> LedgerResult<Vec<CardResponse>> {
        debug!("Listing cards for user: {}", user_id);

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("User", user_id))?;

        let cards = self.card_repository.find_by_user_id(user_id).await?;
        Ok(cards.into_iter().map(CardResponse::from).collect())
    }

    async fn get_card_owner(&self, card_number: &str) -> LedgerResult<CardOwnerResponse> {
        debug!("Looking up owner for card number");

        let card = self.resolve_card(card_number).await?;
        Ok(CardOwnerResponse {
            user_id: card.user_id,
        })
    }

    async fn get_balance_history(&self, card_number: &str) -> LedgerResult<BalanceHistoryResponse> {
        debug!("Loading balance history");

        let card = self.resolve_card(card_number).await?;
        let entries = self.balance_repository.find_by_card_id(card.id).await?;

        Ok(BalanceHistoryResponse {
            card_number: card.number,
            entries: entries.iter().map(BalanceEntryResponse::from).collect(),
        })
    }

    async fn update_balances(&self, requests: Vec<BalanceUpdateRequest>) -> LedgerResult<()> {
        debug!("Processing balance update batch of {}", requests.len());

        // Reject malformed input before any card is touched, so validation
        // failures never leave a partially applied batch behind.
        for request in &requests {
            request.validate_request()?;
            rules::valid_card_number(&request.credit_card_number)
                .map_err(|_| LedgerError::validation("Card number must be 8-19 digits"))?;
        }

        for request in requests {
            let card = self.resolve_card(&request.credit_card_number).await?;

            let entries = self.balance_repository.find_by_card_id(card.id).await?;
            let mut history = BalanceHistory::from_entries(card.id, entries);

            let synthesized = history.fill_gaps();
            if synthesized > 0 {
                debug!("Synthesized {} gap entries for card {}", synthesized, card.id);
            }

            if !history.apply_correction(request.balance_date, request.balance_amount) {
                warn!(
                    "Dropping correction for card {}: {} is outside the known date range",
                    card.id, request.balance_date
                );
            }

            self.balance_repository
                .save_all(&history.into_entries())
                .await?;

            info!("Balance history updated for card {}", card.id);
        }

        Ok(())
    }
}

impl std::fmt::Debug for CardServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardledger_core::{BalanceEntry, CardId, Page, PageRequest, User};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryUserRepository {
        users: Mutex<HashMap<UserId, User>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_id(&self, id: UserId) -> LedgerResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self, page: PageRequest) -> LedgerResult<Page<User>> {
            let users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
            let total = users.len() as u64;
            Ok(Page::new(users, page.page, page.size, total))
        }

        async fn exists_by_email(&self, email: &str) -> LedgerResult<bool> {
            Ok(self.users.lock().unwrap().values().any(|u| u.email == email))
        }

        async fn save(&self, user: &User) -> LedgerResult<User> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> LedgerResult<bool> {
            Ok(self.users.lock().unwrap().remove(&id).is_some())
        }

        async fn count(&self) -> LedgerResult<u64> {
            Ok(self.users.lock().unwrap().len() as u64)
        }
    }

    struct InMemoryCreditCardRepository {
        cards: Mutex<HashMap<CardId, CreditCard>>,
    }

    #[async_trait]
    impl CreditCardRepository for InMemoryCreditCardRepository {
        async fn find_by_id(&self, id: CardId) -> LedgerResult<Option<CreditCard>> {
            Ok(self.cards.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_number(&self, number: &str) -> LedgerResult<Option<CreditCard>> {
            Ok(self
                .cards
                .lock()
                .unwrap()
                .values()
                .find(|c| c.number == number)
                .cloned())
        }

        async fn find_by_user_id(&self, user_id: UserId) -> LedgerResult<Vec<CreditCard>> {
            Ok(self
                .cards
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn exists_by_number(&self, number: &str) -> LedgerResult<bool> {
            Ok(self.cards.lock().unwrap().values().any(|c| c.number == number))
        }

        async fn save(&self, card: &CreditCard) -> LedgerResult<CreditCard> {
            self.cards.lock().unwrap().insert(card.id, card.clone());
            Ok(card.clone())
        }

        async fn delete(&self, id: CardId) -> LedgerResult<bool> {
            Ok(self.cards.lock().unwrap().remove(&id).is_some())
        }
    }

    struct InMemoryBalanceHistoryRepository {
        entries: Mutex<HashMap<(CardId, NaiveDate), BalanceEntry>>,
    }

    #[async_trait]
    impl BalanceHistoryRepository for InMemoryBalanceHistoryRepository {
        async fn find_by_card_id(&self, card_id: CardId) -> LedgerResult<Vec<BalanceEntry>> {
            let mut entries: Vec<BalanceEntry> = self
                .entries
                .lock()
                .unwrap()
                .values()
                .filter(|e| e.card_id == card_id)
                .cloned()
                .collect();
            entries.sort_by_key(|e| e.date);
            Ok(entries)
        }

        async fn find_by_card_id_and_date(
            &self,
            card_id: CardId,
            date: NaiveDate,
        ) -> LedgerResult<Option<BalanceEntry>> {
            Ok(self.entries.lock().unwrap().get(&(card_id, date)).cloned())
        }

        async fn save_all(&self, entries: &[BalanceEntry]) -> LedgerResult<()> {
            let mut store = self.entries.lock().unwrap();
            for entry in entries {
                store.insert((entry.card_id, entry.date), entry.clone());
            }
            Ok(())
        }
    }

    struct Fixture {
        service: CardServiceImpl,
        users: Arc<InMemoryUserRepository>,
        cards: Arc<InMemoryCreditCardRepository>,
        balances: Arc<InMemoryBalanceHistoryRepository>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository {
            users: Mutex::new(HashMap::new()),
        });
        let cards = Arc::new(InMemoryCreditCardRepository {
            cards: Mutex::new(HashMap::new()),
        });
        let balances = Arc::new(InMemoryBalanceHistoryRepository {
            entries: Mutex::new(HashMap::new()),
        });
        let service = CardServiceImpl::new(users.clone(), cards.clone(), balances.clone());
        Fixture {
            service,
            users,
            cards,
            balances,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seed_user(fx: &Fixture) -> UserId {
        let user = User::new("Jane".to_string(), "jane@example.com".to_string());
        fx.users.save(&user).await.unwrap();
        user.id
    }

    async fn seed_card(fx: &Fixture, user_id: UserId, number: &str) -> CardId {
        let card = CreditCard::new(user_id, number.to_string(), "Acme Bank".to_string());
        fx.cards.save(&card).await.unwrap();
        card.id
    }

    async fn seed_balances(fx: &Fixture, card_id: CardId, balances: &[(NaiveDate, Decimal)]) {
        let entries: Vec<BalanceEntry> = balances
            .iter()
            .map(|&(d, b)| BalanceEntry::new(card_id, d, b))
            .collect();
        fx.balances.save_all(&entries).await.unwrap();
    }

    fn update(number: &str, d: NaiveDate, amount: Decimal) -> BalanceUpdateRequest {
        BalanceUpdateRequest {
            credit_card_number: number.to_string(),
            balance_date: d,
            balance_amount: amount,
        }
    }

    async fn balances_of(fx: &Fixture, card_id: CardId) -> Vec<(NaiveDate, Decimal)> {
        fx.balances
            .find_by_card_id(card_id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.date, e.balance))
            .collect()
    }

    // =========================================================================
    // Card CRUD
    // =========================================================================

    #[tokio::test]
    async fn test_add_card() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;

        let response = fx
            .service
            .add_card(AddCreditCardRequest {
                user_id,
                card_number: "4111111111111111".to_string(),
                issuance_bank: "Acme Bank".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.number, "4111111111111111");
        assert!(fx.cards.exists_by_number("4111111111111111").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_card_unknown_user() {
        let fx = fixture();

        let result = fx
            .service
            .add_card(AddCreditCardRequest {
                user_id: UserId::new(),
                card_number: "4111111111111111".to_string(),
                issuance_bank: "Acme Bank".to_string(),
            })
            .await;

        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_card_non_numeric_number_rejected() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;

        let result = fx
            .service
            .add_card(AddCreditCardRequest {
                user_id,
                card_number: "4111-1111-1111-111".to_string(),
                issuance_bank: "Acme Bank".to_string(),
            })
            .await;

        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_card_duplicate_number_conflicts() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        seed_card(&fx, user_id, "4111111111111111").await;

        let result = fx
            .service
            .add_card(AddCreditCardRequest {
                user_id,
                card_number: "4111111111111111".to_string(),
                issuance_bank: "Other Bank".to_string(),
            })
            .await;

        assert!(matches!(result, Err(LedgerError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_user_cards() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        seed_card(&fx, user_id, "4111111111111111").await;
        seed_card(&fx, user_id, "5555555555554444").await;

        let cards = fx.service.list_user_cards(user_id).await.unwrap();
        assert_eq!(cards.len(), 2);

        let result = fx.service.list_user_cards(UserId::new()).await;
        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_card_owner() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        seed_card(&fx, user_id, "4111111111111111").await;

        let owner = fx.service.get_card_owner("4111111111111111").await.unwrap();
        assert_eq!(owner.user_id, user_id);

        let result = fx.service.get_card_owner("9999999999999999").await;
        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    // =========================================================================
    // Batch balance updates
    // =========================================================================

    #[tokio::test]
    async fn test_update_gap_fills_and_propagates() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_id = seed_card(&fx, user_id, "4111111111111111").await;
        seed_balances(
            &fx,
            card_id,
            &[(date(2024, 1, 1), dec!(100)), (date(2024, 1, 5), dec!(100))],
        )
        .await;

        fx.service
            .update_balances(vec![update(
                "4111111111111111",
                date(2024, 1, 3),
                dec!(150),
            )])
            .await
            .unwrap();

        let persisted = balances_of(&fx, card_id).await;
        assert_eq!(
            persisted,
            vec![
                (date(2024, 1, 1), dec!(100)),
                (date(2024, 1, 2), dec!(100)),
                (date(2024, 1, 3), dec!(150)),
                (date(2024, 1, 4), dec!(150)),
                (date(2024, 1, 5), dec!(150)),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_id = seed_card(&fx, user_id, "4111111111111111").await;
        seed_balances(
            &fx,
            card_id,
            &[(date(2024, 1, 1), dec!(100)), (date(2024, 1, 5), dec!(100))],
        )
        .await;

        let request = update("4111111111111111", date(2024, 1, 3), dec!(150));
        fx.service.update_balances(vec![request.clone()]).await.unwrap();
        let first = balances_of(&fx, card_id).await;

        fx.service.update_balances(vec![request]).await.unwrap();
        let second = balances_of(&fx, card_id).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_out_of_range_is_dropped_but_gaps_persist() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_id = seed_card(&fx, user_id, "4111111111111111").await;
        seed_balances(
            &fx,
            card_id,
            &[(date(2024, 1, 1), dec!(100)), (date(2024, 1, 3), dec!(100))],
        )
        .await;

        // Date before the known range: correction dropped, batch succeeds,
        // and the gap-filled day is still persisted.
        fx.service
            .update_balances(vec![update(
                "4111111111111111",
                date(2023, 12, 1),
                dec!(999),
            )])
            .await
            .unwrap();

        let persisted = balances_of(&fx, card_id).await;
        assert_eq!(
            persisted,
            vec![
                (date(2024, 1, 1), dec!(100)),
                (date(2024, 1, 2), dec!(100)),
                (date(2024, 1, 3), dec!(100)),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_card_with_no_history_is_noop() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_id = seed_card(&fx, user_id, "4111111111111111").await;

        fx.service
            .update_balances(vec![update(
                "4111111111111111",
                date(2024, 1, 1),
                dec!(100),
            )])
            .await
            .unwrap();

        assert!(balances_of(&fx, card_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_aborts_on_first_unknown_card() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_a = seed_card(&fx, user_id, "4111111111111111").await;
        let card_b = seed_card(&fx, user_id, "5555555555554444").await;
        seed_balances(&fx, card_a, &[(date(2024, 1, 1), dec!(100))]).await;
        seed_balances(&fx, card_b, &[(date(2024, 1, 1), dec!(200))]).await;

        let result = fx
            .service
            .update_balances(vec![
                update("4111111111111111", date(2024, 1, 1), dec!(150)),
                update("9999999999999999", date(2024, 1, 1), dec!(50)),
                update("5555555555554444", date(2024, 1, 1), dec!(75)),
            ])
            .await;

        assert!(matches!(result, Err(LedgerError::NotFound { .. })));

        // The first request was applied and stays committed
        assert_eq!(
            balances_of(&fx, card_a).await,
            vec![(date(2024, 1, 1), dec!(150))]
        );
        // The request after the failure was never attempted
        assert_eq!(
            balances_of(&fx, card_b).await,
            vec![(date(2024, 1, 1), dec!(200))]
        );
    }

    #[tokio::test]
    async fn test_batch_validation_precedes_processing() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_id = seed_card(&fx, user_id, "4111111111111111").await;
        seed_balances(&fx, card_id, &[(date(2024, 1, 1), dec!(100))]).await;

        // A malformed request anywhere in the batch rejects the whole batch
        // before any card is touched.
        let result = fx
            .service
            .update_balances(vec![
                update("4111111111111111", date(2024, 1, 1), dec!(150)),
                update("bad", date(2024, 1, 1), dec!(50)),
            ])
            .await;

        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert_eq!(
            balances_of(&fx, card_id).await,
            vec![(date(2024, 1, 1), dec!(100))]
        );
    }

    #[tokio::test]
    async fn test_get_balance_history() {
        let fx = fixture();
        let user_id = seed_user(&fx).await;
        let card_id = seed_card(&fx, user_id, "4111111111111111").await;
        seed_balances(
            &fx,
            card_id,
            &[(date(2024, 1, 2), dec!(20)), (date(2024, 1, 1), dec!(10))],
        )
        .await;

        let history = fx
            .service
            .get_balance_history("4111111111111111")
            .await
            .unwrap();

        assert_eq!(history.card_number, "4111111111111111");
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[0].date, date(2024, 1, 1));
        assert_eq!(history.entries[1].date, date(2024, 1, 2));
    }
}
