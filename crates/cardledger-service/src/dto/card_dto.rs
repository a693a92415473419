//! Credit-card and balance-update DTOs.

use cardledger_core::{BalanceEntry, CardId, CreditCard, UserId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to add a credit card to a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddCreditCardRequest {
    pub user_id: UserId,

    #[validate(length(min = 8, max = 19, message = "Card number must be 8-19 digits"))]
    pub card_number: String,

    #[validate(length(min = 1, max = 128, message = "Issuance bank must be 1-128 characters"))]
    pub issuance_bank: String,
}

/// Credit-card response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardResponse {
    pub id: CardId,
    pub number: String,
    pub issuance_bank: String,
}

impl From<CreditCard> for CardResponse {
    fn from(card: CreditCard) -> Self {
        Self {
            id: card.id,
            number: card.number,
            issuance_bank: card.issuance_bank,
        }
    }
}

/// The owning user of a credit card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardOwnerResponse {
    pub user_id: UserId,
}

/// One balance correction in a batch update.
///
/// A batch is an ordered list of these; each names the card by number, the
/// calendar day the reported balance applies to, and the corrected amount.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BalanceUpdateRequest {
    #[validate(length(min = 8, max = 19, message = "Card number must be 8-19 digits"))]
    pub credit_card_number: String,

    pub balance_date: NaiveDate,

    pub balance_amount: Decimal,
}

/// One day's balance in a card's history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceEntryResponse {
    pub date: NaiveDate,
    pub balance: Decimal,
}

impl From<&BalanceEntry> for BalanceEntryResponse {
    fn from(entry: &BalanceEntry) -> Self {
        Self {
            date: entry.date,
            balance: entry.balance,
        }
    }
}

/// A card's balance history, date ascending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceHistoryResponse {
    pub card_number: String,
    pub entries: Vec<BalanceEntryResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use validator::Validate;

    #[test]
    fn test_add_card_request_valid() {
        let request = AddCreditCardRequest {
            user_id: UserId::new(),
            card_number: "4111111111111111".to_string(),
            issuance_bank: "Acme Bank".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_add_card_request_number_too_short() {
        let request = AddCreditCardRequest {
            user_id: UserId::new(),
            card_number: "1234".to_string(),
            issuance_bank: "Acme Bank".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_balance_update_request_deserializes() {
        let json = r#"{
            "credit_card_number": "4111111111111111",
            "balance_date": "2024-01-03",
            "balance_amount": 150.00
        }"#;

        let request: BalanceUpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.credit_card_number, "4111111111111111");
        assert_eq!(
            request.balance_date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert_eq!(request.balance_amount, dec!(150.00));
    }

    #[test]
    fn test_card_response_from_card() {
        let card = CreditCard::new(
            UserId::new(),
            "4111111111111111".to_string(),
            "Acme Bank".to_string(),
        );
        let response: CardResponse = card.clone().into();

        assert_eq!(response.id, card.id);
        assert_eq!(response.number, card.number);
        assert_eq!(response.issuance_bank, card.issuance_bank);
    }

    #[test]
    fn test_balance_entry_response_from_entry() {
        let entry = BalanceEntry::new(
            CardId::new(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            dec!(100),
        );
        let response = BalanceEntryResponse::from(&entry);
        assert_eq!(response.date, entry.date);
        assert_eq!(response.balance, entry.balance);
    }
}
