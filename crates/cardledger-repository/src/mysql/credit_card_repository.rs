//! MySQL credit-card repository implementation.

use crate::{traits::CreditCardRepository, DatabasePoolInterface};
use async_trait::async_trait;
use cardledger_core::{CardId, CreditCard, LedgerError, LedgerResult, UserId};
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL credit-card repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CreditCardRepository)]
pub struct MySqlCreditCardRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCreditCardRepository {
    /// Creates a new MySQL credit-card repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a credit card.
#[derive(Debug, FromRow)]
struct CreditCardRow {
    id: String,
    user_id: String,
    number: String,
    issuance_bank: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CreditCardRow> for CreditCard {
    type Error = LedgerError;

    fn try_from(row: CreditCardRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| LedgerError::Internal(format!("Invalid UUID in database: {}", e)))?;
        let user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| LedgerError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(CreditCard {
            id: CardId::from_uuid(id),
            user_id: UserId::from_uuid(user_id),
            number: row.number,
            issuance_bank: row.issuance_bank,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CreditCardRepository for MySqlCreditCardRepository {
    async fn find_by_id(&self, id: CardId) -> LedgerResult<Option<CreditCard>> {
        debug!("Finding card by id: {}", id);

        let row = sqlx::query_as::<_, CreditCardRow>(
            r#"
            SELECT id, user_id, number, issuance_bank, created_at, updated_at
            FROM credit_cards
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(CreditCard::try_from).transpose()
    }

    async fn find_by_number(&self, number: &str) -> LedgerResult<Option<CreditCard>> {
        debug!("Finding card by number");

        let row = sqlx::query_as::<_, CreditCardRow>(
            r#"
            SELECT id, user_id, number, issuance_bank, created_at, updated_at
            FROM credit_cards
            WHERE number = ?
            "#,
        )
        .bind(number)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(CreditCard::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> LedgerResult<Vec<CreditCard>> {
        debug!("Finding cards for user: {}", user_id);

        let rows = sqlx::query_as::<_, CreditCardRow>(
            r#"
            SELECT id, user_id, number, issuance_bank, created_at, updated_at
            FROM credit_cards
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.into_inner().to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter()
            .map(CreditCard::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn exists_by_number(&self, number: &str) -> LedgerResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM credit_cards WHERE number = ? LIMIT 1")
                .bind(number)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn save(&self, card: &CreditCard) -> LedgerResult<CreditCard> {
        debug!("Saving new card: {}", card.id);

        sqlx::query(
            r#"
            INSERT INTO credit_cards (id, user_id, number, issuance_bank, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(card.id.into_inner().to_string())
        .bind(card.user_id.into_inner().to_string())
        .bind(&card.number)
        .bind(&card.issuance_bank)
        .bind(card.created_at)
        .bind(card.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(card.id)
            .await?
            .ok_or_else(|| LedgerError::Internal("Failed to fetch inserted card".to_string()))
    }

    async fn delete(&self, id: CardId) -> LedgerResult<bool> {
        debug!("Deleting card: {}", id);

        let result = sqlx::query("DELETE FROM credit_cards WHERE id = ?")
            .bind(id.into_inner().to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlCreditCardRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCreditCardRepository")
            .finish_non_exhaustive()
    }
}
