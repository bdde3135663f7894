// 🏦 Account - account record and its request descriptors
//
// Every account-scoped endpoint takes `account_id` as a query parameter.

use crate::error::ModelError;
use crate::request::{Params, Request};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub description: String,
    pub created: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub closed: bool,
}

impl Account {
    /// Display name (the API calls it description)
    pub fn name(&self) -> &str {
        &self.description
    }

    pub fn created(&self) -> Result<DateTime<Utc>, ModelError> {
        crate::transaction::parse_timestamp("created", &self.created)
    }

    fn scoped(&self, path: &str) -> Request {
        Request::get(path).query("account_id", self.id.as_str())
    }

    pub fn balance_request(&self) -> Request {
        self.scoped("/balance")
    }

    pub fn transaction_request(&self, tx_id: &str) -> Request {
        Request::get(format!("/transactions/{}", tx_id)).query("expand[]", "merchant")
    }

    pub fn transactions_request(&self, pagination: &Pagination) -> Request {
        self.scoped("/transactions")
            .query("expand[]", "merchant")
            .query_params(pagination.params())
    }

    pub fn targets_request(&self) -> Request {
        self.scoped("/targets")
    }

    pub fn limits_request(&self) -> Request {
        self.scoped("/balance/limits")
    }

    pub fn cards_request(&self) -> Request {
        self.scoped("/card/list")
    }

    pub fn freeze_card_request(&self, card_id: &str) -> Request {
        card_toggle(card_id, "INACTIVE")
    }

    pub fn defrost_card_request(&self, card_id: &str) -> Request {
        card_toggle(card_id, "ACTIVE")
    }
}

fn card_toggle(card_id: &str, status: &str) -> Request {
    Request::put("/card/toggle")
        .body("card_id", card_id)
        .body("status", status)
}

pub fn accounts_request() -> Request {
    Request::get("/accounts")
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
}

// ============================================================================
// PAGINATION
// ============================================================================

/// Lower bound of a page: a timestamp or the id of the last transaction seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Since {
    Time(DateTime<Utc>),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pagination {
    pub since: Option<Since>,
    pub before: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl Pagination {
    /// Query parameters for this page; a zero limit is omitted
    pub fn params(&self) -> Params {
        let mut params = Params::new();

        match &self.since {
            Some(Since::Time(time)) => {
                params.insert("since".to_string(), Value::from(iso_timestamp(time)));
            }
            Some(Since::Id(id)) => {
                params.insert("since".to_string(), Value::from(id.as_str()));
            }
            None => {}
        }

        if let Some(before) = &self.before {
            params.insert("before".to_string(), Value::from(iso_timestamp(before)));
        }

        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            params.insert("limit".to_string(), Value::from(limit));
        }

        params
    }
}

/// Shape pagination options into query parameters
pub fn paginate(pagination: &Pagination) -> Params {
    pagination.params()
}

fn iso_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use chrono::TimeZone;
    use serde_json::json;

    fn create_test_account() -> Account {
        Account {
            id: "acc_1".to_string(),
            description: "Personal".to_string(),
            created: "2019-03-01T10:00:00.000Z".to_string(),
            kind: "uk_retail".to_string(),
            closed: false,
        }
    }

    #[test]
    fn test_account_accessors() {
        let account = create_test_account();
        assert_eq!(account.name(), "Personal");
        assert_eq!(
            account.created().unwrap(),
            Utc.with_ymd_and_hms(2019, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_scoped_requests() {
        let account = create_test_account();

        for (request, path) in [
            (account.balance_request(), "/balance"),
            (account.targets_request(), "/targets"),
            (account.limits_request(), "/balance/limits"),
            (account.cards_request(), "/card/list"),
        ] {
            assert_eq!(request.method, HttpMethod::Get);
            assert_eq!(request.path, path);
            assert_eq!(request.query["account_id"], "acc_1");
        }
    }

    #[test]
    fn test_transaction_requests() {
        let account = create_test_account();

        let single = account.transaction_request("tx_1");
        assert_eq!(single.path, "/transactions/tx_1");
        assert_eq!(single.query["expand[]"], "merchant");

        let page = account.transactions_request(&Pagination {
            since: Some(Since::Id("tx_0".to_string())),
            before: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            limit: Some(50),
        });
        assert_eq!(page.path, "/transactions");
        assert_eq!(page.query["account_id"], "acc_1");
        assert_eq!(page.query["since"], "tx_0");
        assert_eq!(page.query["before"], "2020-01-01T00:00:00.000Z");
        assert_eq!(page.query["limit"], 50);
    }

    #[test]
    fn test_paginate_omits_empty_options() {
        assert!(paginate(&Pagination::default()).is_empty());

        let params = paginate(&Pagination {
            since: Some(Since::Time(Utc.with_ymd_and_hms(2020, 5, 4, 3, 2, 1).unwrap())),
            before: None,
            limit: Some(0),
        });
        assert_eq!(params.len(), 1);
        assert_eq!(params["since"], json!("2020-05-04T03:02:01.000Z"));
    }

    #[test]
    fn test_card_toggle_requests() {
        let account = create_test_account();

        let freeze = account.freeze_card_request("card_1");
        assert_eq!(freeze.method, HttpMethod::Put);
        assert_eq!(freeze.path, "/card/toggle");
        assert_eq!(freeze.body["status"], "INACTIVE");

        let defrost = account.defrost_card_request("card_1");
        assert_eq!(defrost.body["card_id"], "card_1");
        assert_eq!(defrost.body["status"], "ACTIVE");
    }

    #[test]
    fn test_accounts_request() {
        let request = accounts_request();
        assert_eq!(request.path, "/accounts");
        assert_eq!(request.method, HttpMethod::Get);
    }
}
