//! MySQL balance-history repository implementation.

use crate::{traits::BalanceHistoryRepository, DatabasePoolInterface};
use async_trait::async_trait;
use cardledger_core::{BalanceEntry, BalanceEntryId, CardId, LedgerError, LedgerResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL balance-history repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = BalanceHistoryRepository)]
pub struct MySqlBalanceHistoryRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlBalanceHistoryRepository {
    /// Creates a new MySQL balance-history repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a balance entry.
#[derive(Debug, FromRow)]
struct BalanceEntryRow {
    id: String,
    credit_card_id: String,
    entry_date: NaiveDate,
    balance: Decimal,
}

impl TryFrom<BalanceEntryRow> for BalanceEntry {
    type Error = LedgerError;

    fn try_from(row: BalanceEntryRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| LedgerError::Internal(format!("Invalid UUID in database: {}", e)))?;
        let card_id = Uuid::parse_str(&row.credit_card_id)
            .map_err(|e| LedgerError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(BalanceEntry {
            id: BalanceEntryId::from_uuid(id),
            card_id: CardId::from_uuid(card_id),
            date: row.entry_date,
            balance: row.balance,
        })
    }
}

#[async_trait]
impl BalanceHistoryRepository for MySqlBalanceHistoryRepository {
    async fn find_by_card_id(&self, card_id: CardId) -> LedgerResult<Vec<BalanceEntry>> {
        debug!("Loading balance history for card: {}", card_id);

        let rows = sqlx::query_as::<_, BalanceEntryRow>(
            r#"
            SELECT id, credit_card_id, entry_date, balance
            FROM balance_history
            WHERE credit_card_id = ?
            ORDER BY entry_date ASC
            "#,
        )
        .bind(card_id.into_inner().to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter()
            .map(BalanceEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_card_id_and_date(
        &self,
        card_id: CardId,
        date: NaiveDate,
    ) -> LedgerResult<Option<BalanceEntry>> {
        debug!("Loading balance entry for card {} on {}", card_id, date);

        let row = sqlx::query_as::<_, BalanceEntryRow>(
            r#"
            SELECT id, credit_card_id, entry_date, balance
            FROM balance_history
            WHERE credit_card_id = ? AND entry_date = ?
            "#,
        )
        .bind(card_id.into_inner().to_string())
        .bind(date)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(BalanceEntry::try_from).transpose()
    }

    async fn save_all(&self, entries: &[BalanceEntry]) -> LedgerResult<()> {
        debug!("Persisting {} balance entries", entries.len());

        let mut tx = self.pool.inner().begin().await?;

        for entry in entries {
            // Keyed on (credit_card_id, entry_date): existing rows keep
            // their id, new days insert with the entry's generated id.
            sqlx::query(
                r#"
                INSERT INTO balance_history (id, credit_card_id, entry_date, balance)
                VALUES (?, ?, ?, ?)
                ON DUPLICATE KEY UPDATE balance = VALUES(balance)
                "#,
            )
            .bind(entry.id.into_inner().to_string())
            .bind(entry.card_id.into_inner().to_string())
            .bind(entry.date)
            .bind(entry.balance)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

impl std::fmt::Debug for MySqlBalanceHistoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlBalanceHistoryRepository")
            .finish_non_exhaustive()
    }
}
