//! Balance-entry entity.

use crate::{BalanceEntryId, CardId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day's recorded balance for a credit card.
///
/// Entries are owned by exactly one card's history. They are created either
/// from client balance reports or synthesized during gap-filling; storage
/// keeps at most one row per `(card, date)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Unique identifier for the entry.
    pub id: BalanceEntryId,

    /// Identifier of the owning card.
    pub card_id: CardId,

    /// Calendar day this balance applies to.
    pub date: NaiveDate,

    /// Recorded balance at the end of that day.
    pub balance: Decimal,
}

impl BalanceEntry {
    /// Creates a new balance entry.
    #[must_use]
    pub fn new(card_id: CardId, date: NaiveDate, balance: Decimal) -> Self {
        Self {
            id: BalanceEntryId::new(),
            card_id,
            date,
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_entry() {
        let card_id = CardId::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let entry = BalanceEntry::new(card_id, date, dec!(100));
        assert_eq!(entry.card_id, card_id);
        assert_eq!(entry.date, date);
        assert_eq!(entry.balance, dec!(100));
    }
}
