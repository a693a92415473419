//! Balance-history aggregate for one credit card.
//!
//! The history is keyed by calendar day, so traversal is always
//! chronological and the order entries were loaded in never matters.
//! Two operations maintain the series:
//!
//! - [`BalanceHistory::fill_gaps`] densifies the series between its earliest
//!   and latest known dates, carrying the last observed balance into each
//!   missing day.
//! - [`BalanceHistory::apply_correction`] sets the balance at one date and
//!   shifts every later day by the same signed difference, leaving earlier
//!   history untouched.

use crate::{BalanceEntry, CardId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// The per-day balance series of a single credit card.
///
/// Invariant after [`fill_gaps`](Self::fill_gaps): exactly one entry exists
/// for every day between the earliest and latest known dates.
#[derive(Debug, Clone)]
pub struct BalanceHistory {
    card_id: CardId,
    entries: BTreeMap<NaiveDate, BalanceEntry>,
}

impl BalanceHistory {
    /// Creates an empty history for a card.
    #[must_use]
    pub fn new(card_id: CardId) -> Self {
        Self {
            card_id,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a history from stored entries, in any order.
    ///
    /// Duplicate dates violate the storage invariant (one row per card/day);
    /// if they occur anyway, the last one read wins.
    #[must_use]
    pub fn from_entries(card_id: CardId, entries: Vec<BalanceEntry>) -> Self {
        let mut history = Self::new(card_id);
        for entry in entries {
            history.entries.insert(entry.date, entry);
        }
        history
    }

    /// Returns the card this history belongs to.
    #[must_use]
    pub const fn card_id(&self) -> CardId {
        self.card_id
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the history has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the earliest known date, if any.
    #[must_use]
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next().copied()
    }

    /// Returns the latest known date, if any.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next_back().copied()
    }

    /// Returns the balance recorded for a date, if an entry exists.
    #[must_use]
    pub fn balance_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.entries.get(&date).map(|e| e.balance)
    }

    /// Iterates entries in ascending date order.
    pub fn entries(&self) -> impl Iterator<Item = &BalanceEntry> {
        self.entries.values()
    }

    /// Consumes the history, returning entries in ascending date order.
    #[must_use]
    pub fn into_entries(self) -> Vec<BalanceEntry> {
        self.entries.into_values().collect()
    }

    /// Synthesizes an entry for every missing day between the earliest and
    /// latest known dates, carrying the most recent preceding balance
    /// forward. Existing entries are never altered or removed.
    ///
    /// Returns the number of synthesized entries. An empty history stays
    /// empty: no entry is invented for a date that was never reported.
    pub fn fill_gaps(&mut self) -> usize {
        let (Some(earliest), Some(latest)) = (self.earliest_date(), self.latest_date()) else {
            return 0;
        };

        let mut synthesized = Vec::new();
        // The walk starts on the earliest day, which always has an entry,
        // so the carry is assigned before the first missing day uses it.
        let mut carry = Decimal::ZERO;
        let mut day = earliest;
        while day <= latest {
            match self.entries.get(&day) {
                Some(entry) => carry = entry.balance,
                None => synthesized.push(BalanceEntry::new(self.card_id, day, carry)),
            }
            let Some(next) = day.succ_opt() else {
                break;
            };
            day = next;
        }

        let count = synthesized.len();
        for entry in synthesized {
            self.entries.insert(entry.date, entry);
        }
        count
    }

    /// Applies a balance correction at `date` and propagates the signed
    /// difference to every later entry. Entries before `date` are untouched.
    ///
    /// Returns `false` without mutating anything when no entry exists for
    /// `date` (a target outside the known range, or an empty history): the
    /// correction is dropped rather than extending the series.
    /// Reapplying the same correction is a no-op, since the difference is
    /// then zero.
    pub fn apply_correction(&mut self, date: NaiveDate, amount: Decimal) -> bool {
        let Some(current) = self.balance_on(date) else {
            return false;
        };

        let delta = amount - current;
        for (_, entry) in self.entries.range_mut(date..) {
            entry.balance += delta;
        }
        true
    }
}
