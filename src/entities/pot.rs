// 🍯 Pot - savings sub-account and its transfer descriptors

use crate::amount::{Amount, SimpleAmount};
use crate::error::ModelError;
use super::null_as_default;
use crate::request::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency assumed when a pot record carries none
pub const DEFAULT_POT_CURRENCY: &str = "GBP";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pot {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub style: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub balance: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub goal_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub minimum_balance: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub maximum_balance: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub round_up: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated: String,
}

impl Pot {
    pub fn currency(&self) -> &str {
        if self.currency.is_empty() {
            DEFAULT_POT_CURRENCY
        } else {
            &self.currency
        }
    }

    fn in_currency(&self, minor: f64) -> Amount {
        Amount::from_parts(SimpleAmount::new(minor, self.currency()), None)
    }

    pub fn balance(&self) -> Amount {
        self.in_currency(self.balance)
    }

    pub fn goal_amount(&self) -> Amount {
        self.in_currency(self.goal_amount)
    }

    pub fn created(&self) -> Result<DateTime<Utc>, ModelError> {
        crate::transaction::parse_timestamp("created", &self.created)
    }

    pub fn updated(&self) -> Result<DateTime<Utc>, ModelError> {
        crate::transaction::parse_timestamp("updated", &self.updated)
    }

    pub fn delete_pot_request(&self) -> Request {
        Request::delete(format!("/pots/{}", self.id))
    }

    /// Move money from an account into this pot
    pub fn deposit_request(&self, deposit: &PotDeposit) -> Request {
        Request::put(format!("/pots/{}/deposit", self.id))
            .body("source_account_id", deposit.source_account_id.as_str())
            .body("amount", deposit.amount)
            .body("dedupe_id", deposit.dedupe_id.as_str())
    }

    /// Move money out of this pot into an account
    pub fn withdraw_request(&self, withdrawal: &PotWithdrawal) -> Request {
        Request::put(format!("/pots/{}/withdraw", self.id))
            .body("destination_account_id", withdrawal.destination_account_id.as_str())
            .body("amount", withdrawal.amount)
            .body("dedupe_id", withdrawal.dedupe_id.as_str())
    }
}

impl fmt::Display for Pot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

pub fn pots_request() -> Request {
    Request::get("/pots")
}

pub fn pot_request(id: &str) -> Request {
    Request::get(format!("/pots/{}", id))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PotsResponse {
    pub pots: Vec<Pot>,
}

// ============================================================================
// TRANSFERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotDeposit {
    pub source_account_id: String,
    /// Minor units
    pub amount: i64,
    /// Makes retries of the same transfer idempotent
    pub dedupe_id: String,
}

impl PotDeposit {
    /// Deposit with a fresh dedupe id
    pub fn new(source_account_id: impl Into<String>, amount: i64) -> Self {
        PotDeposit {
            source_account_id: source_account_id.into(),
            amount,
            dedupe_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotWithdrawal {
    pub destination_account_id: String,
    pub amount: i64,
    pub dedupe_id: String,
}

impl PotWithdrawal {
    pub fn new(destination_account_id: impl Into<String>, amount: i64) -> Self {
        PotWithdrawal {
            destination_account_id: destination_account_id.into(),
            amount,
            dedupe_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use serde_json::json;

    fn create_test_pot() -> Pot {
        serde_json::from_value(json!({
            "id": "pot_1",
            "name": "Holiday",
            "style": "beach_ball",
            "type": "default",
            "balance": 13370,
            "currency": "GBP",
            "goal_amount": 50000,
            "round_up": true,
            "deleted": false,
            "created": "2019-01-01T12:00:00.000Z",
            "updated": "2019-02-01T12:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_pot_amounts() {
        let pot = create_test_pot();
        assert_eq!(pot.balance().to_string(), "+£133.70");
        assert_eq!(pot.goal_amount().amount(), 500.0);
        assert!(pot.round_up);
        assert_eq!(pot.to_string(), "Holiday (pot_1)");
    }

    #[test]
    fn test_blank_currency_defaults_to_gbp() {
        let pot = Pot {
            balance: 100.0,
            ..Default::default()
        };
        assert_eq!(pot.balance().currency(), "GBP");
    }

    #[test]
    fn test_null_goal_and_currency() {
        let pot: Pot = serde_json::from_value(json!({
            "id": "pot_2",
            "name": "Rainy day",
            "balance": 2500,
            "currency": null,
            "goal_amount": null,
            "round_up": null
        }))
        .unwrap();

        assert_eq!(pot.balance().to_string(), "+£25.00");
        assert_eq!(pot.goal_amount().raw(), 0.0);
        assert!(!pot.round_up);
    }

    #[test]
    fn test_pot_lookup_requests() {
        assert_eq!(pots_request().path, "/pots");
        assert_eq!(pot_request("pot_1").path, "/pots/pot_1");

        let delete = create_test_pot().delete_pot_request();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.path, "/pots/pot_1");
    }

    #[test]
    fn test_transfer_requests() {
        let pot = create_test_pot();

        let deposit = PotDeposit::new("acc_1", 500);
        let request = pot.deposit_request(&deposit);
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/pots/pot_1/deposit");
        assert_eq!(request.body["source_account_id"], "acc_1");
        assert_eq!(request.body["amount"], 500);
        assert_eq!(request.body["dedupe_id"], deposit.dedupe_id.as_str());

        let withdrawal = PotWithdrawal::new("acc_1", 250);
        let request = pot.withdraw_request(&withdrawal);
        assert_eq!(request.path, "/pots/pot_1/withdraw");
        assert_eq!(request.body["destination_account_id"], "acc_1");
    }

    #[test]
    fn test_dedupe_ids_are_unique() {
        assert_ne!(
            PotDeposit::new("acc_1", 1).dedupe_id,
            PotDeposit::new("acc_1", 1).dedupe_id
        );
    }
}
