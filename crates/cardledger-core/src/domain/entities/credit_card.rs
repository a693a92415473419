//! Credit-card entity.

use crate::{CardId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credit card belonging to a user.
///
/// The card number is the external identifier clients use in balance-update
/// requests; it is unique across the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    /// Unique identifier for the card.
    pub id: CardId,

    /// Identifier of the owning user.
    pub user_id: UserId,

    /// Card number (digits only).
    pub number: String,

    /// Name of the issuing bank.
    pub issuance_bank: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    /// Creates a new credit card for a user.
    #[must_use]
    pub fn new(user_id: UserId, number: String, issuance_bank: String) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            user_id,
            number,
            issuance_bank,
            created_at: now,
            updated_at: now,
        }
    }
}
