// ⚖️ Balance - account balance and today's spend, optionally in a travel currency

use crate::amount::{Amount, AmountOpts};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSpend {
    pub spend_today: f64,
    pub currency: String,
}

/// Body returned by `/balance`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceResponse {
    pub balance: f64,
    pub total_balance: f64,
    pub currency: String,
    pub spend_today: f64,
    pub local_currency: String,
    pub local_exchange_rate: f64,
    pub local_spend: Vec<LocalSpend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub balance: Amount,
    pub spent: Amount,
}

/// Balance and spend as Amounts. When a local currency is active both carry
/// a local value converted at `local_exchange_rate`.
pub fn extract_balance_and_spent(response: &BalanceResponse) -> Result<BalanceSummary, ModelError> {
    let currency = response.currency.as_str();

    if response.local_currency.is_empty() {
        return Ok(BalanceSummary {
            balance: Amount::new(AmountOpts::domestic(response.balance, currency))?,
            spent: Amount::new(AmountOpts::domestic(response.spend_today, currency))?,
        });
    }

    let rate = response.local_exchange_rate;
    let local_currency = response.local_currency.as_str();
    let local_spend_today = response
        .local_spend
        .first()
        .map(|spend| spend.spend_today * rate)
        .unwrap_or(0.0);

    Ok(BalanceSummary {
        balance: Amount::new(
            AmountOpts::domestic(response.balance, currency)
                .with_local(response.balance * rate, local_currency),
        )?,
        spent: Amount::new(
            AmountOpts::domestic(response.spend_today, currency)
                .with_local(local_spend_today, local_currency),
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidAmountError;
    use serde_json::json;

    #[test]
    fn test_domestic_only() {
        let response: BalanceResponse = serde_json::from_value(json!({
            "balance": 5000,
            "total_balance": 6000,
            "currency": "GBP",
            "spend_today": -250,
            "local_currency": "",
            "local_exchange_rate": 0,
            "local_spend": []
        }))
        .unwrap();

        let summary = extract_balance_and_spent(&response).unwrap();
        assert_eq!(summary.balance.to_string(), "+£50.00");
        assert_eq!(summary.spent.raw(), -250.0);
        assert!(!summary.balance.foreign());
    }

    #[test]
    fn test_local_currency_conversion() {
        let response = BalanceResponse {
            balance: 1000.0,
            currency: "GBP".to_string(),
            spend_today: -200.0,
            local_currency: "EUR".to_string(),
            local_exchange_rate: 1.5,
            local_spend: vec![LocalSpend {
                spend_today: -100.0,
                currency: "EUR".to_string(),
            }],
            ..Default::default()
        };

        let summary = extract_balance_and_spent(&response).unwrap();
        let local_balance = summary.balance.exchanged().unwrap();
        assert_eq!(local_balance.currency(), "EUR");
        assert_eq!(local_balance.raw(), 1500.0);
        assert_eq!(summary.spent.exchanged().unwrap().raw(), -150.0);
    }

    #[test]
    fn test_local_spend_defaults_to_zero() {
        let response = BalanceResponse {
            balance: 1000.0,
            currency: "GBP".to_string(),
            local_currency: "USD".to_string(),
            local_exchange_rate: 1.25,
            ..Default::default()
        };

        let summary = extract_balance_and_spent(&response).unwrap();
        assert_eq!(summary.spent.exchanged().unwrap().raw(), 0.0);
    }

    #[test]
    fn test_non_finite_rate_is_rejected() {
        let response = BalanceResponse {
            balance: 1000.0,
            currency: "GBP".to_string(),
            local_currency: "EUR".to_string(),
            local_exchange_rate: f64::INFINITY,
            ..Default::default()
        };

        assert!(matches!(
            extract_balance_and_spent(&response),
            Err(ModelError::InvalidAmount(InvalidAmountError::InvalidLocalAmount))
        ));
    }

    #[test]
    fn test_missing_currency_is_rejected() {
        let result = extract_balance_and_spent(&BalanceResponse::default());
        assert!(matches!(
            result,
            Err(ModelError::InvalidAmount(InvalidAmountError::InvalidDomesticCurrency))
        ));
    }
}
