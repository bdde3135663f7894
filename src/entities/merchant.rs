// 🏪 Merchant - expanded merchant record attached to a transaction
//
// Transactions reference merchants either by bare id (unexpanded) or by an
// embedded record when requested with `expand[]=merchant`.

use super::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// ADDRESS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantAddress {
    #[serde(deserialize_with = "null_as_default")]
    pub short_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postcode: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ============================================================================
// MERCHANT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Merchant {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    /// Shared by all branches of the same business
    #[serde(deserialize_with = "null_as_default")]
    pub group_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub emoji: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub online: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub atm: bool,
    pub address: Option<MerchantAddress>,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,
}

impl Merchant {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn logo(&self) -> Option<&str> {
        non_empty(&self.logo)
    }

    /// Group identifier, falling back to the merchant id
    pub fn group_id(&self) -> &str {
        non_empty(&self.group_id).unwrap_or(&self.id)
    }

    pub fn online(&self) -> bool {
        self.online
    }

    pub fn short_address(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|address| non_empty(&address.short_formatted))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_partial_record() {
        let merchant: Merchant = serde_json::from_value(json!({
            "id": "merch_1",
            "group_id": "grp_1",
            "name": "Pret A Manger",
            "logo": "https://example.com/pret.png",
            "address": { "short_formatted": "London EC1" },
            "unknown_field": true
        }))
        .unwrap();

        assert_eq!(merchant.name(), Some("Pret A Manger"));
        assert_eq!(merchant.group_id(), "grp_1");
        assert_eq!(merchant.short_address(), Some("London EC1"));
        assert!(!merchant.online());
    }

    #[test]
    fn test_null_fields_read_as_blank() {
        let merchant: Merchant = serde_json::from_value(json!({
            "id": "merch_1",
            "group_id": null,
            "name": "Pret",
            "logo": null,
            "emoji": null,
            "online": null,
            "metadata": null,
            "address": { "short_formatted": null, "city": "London", "latitude": null }
        }))
        .unwrap();

        assert_eq!(merchant.name(), Some("Pret"));
        assert_eq!(merchant.logo(), None);
        assert_eq!(merchant.emoji, "");
        assert_eq!(merchant.group_id(), "merch_1");
        assert!(!merchant.online());
        assert_eq!(merchant.short_address(), None);
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let merchant = Merchant {
            id: "merch_2".to_string(),
            ..Default::default()
        };

        assert_eq!(merchant.name(), None);
        assert_eq!(merchant.logo(), None);
        assert_eq!(merchant.group_id(), "merch_2");
        assert_eq!(merchant.short_address(), None);
    }
}
