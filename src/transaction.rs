// 🧾 Transaction View - display state derived from a raw transaction record
//
// The record is immutable for the lifetime of the view, so every derived
// property is recomputed on access from the wire fields. Presence matters:
// a missing `decline_reason` means "not declined", a missing or blank
// `settled` means "not yet settled".

use crate::amount::{Amount, AmountOpts};
use crate::config::ClientConfig;
use crate::entities::{null_as_default, Attachment, Merchant};
use crate::error::ModelError;
use crate::request::Request;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Metadata key used to hide a transaction from feeds
pub const HIDDEN_METADATA_KEY: &str = "monux_hidden";

pub const DEFAULT_ATTACHMENT_TYPE: &str = "image/jpeg";

/// Scheme of transfers between an account and its pots
const POT_SCHEME: &str = "uk_retail_pot";

/// Abbreviations kept uppercase in decline reasons
const UPPERCASE_ABBREVIATIONS: [&str; 2] = ["cvc", "pin"];

// ============================================================================
// RAW RECORD (wire format)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Counterparty {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prefered_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sort_code: String,
    /// Set for peer-to-peer payments between customers
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
}

impl Counterparty {
    pub fn name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|name| !name.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        Some(self.user_id.as_str()).filter(|id| !id.is_empty())
    }
}

/// `merchant` is a bare id unless the request asked for `expand[]=merchant`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MerchantField {
    Id(String),
    Expanded(Box<Merchant>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: String,

    /// Signed minor units in the account currency
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,

    /// Signed minor units in the currency charged at the point of sale
    #[serde(deserialize_with = "null_as_default")]
    pub local_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_currency: String,

    #[serde(deserialize_with = "null_as_default")]
    pub account_balance: f64,

    #[serde(deserialize_with = "null_as_default")]
    pub category: String,

    #[serde(deserialize_with = "null_as_default")]
    pub created: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub updated: String,

    #[serde(deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,

    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,

    #[serde(deserialize_with = "null_as_default")]
    pub counterparty: Counterparty,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<MerchantField>,

    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub scheme: String,

    #[serde(deserialize_with = "null_as_default")]
    pub include_in_spending: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub dedupe_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub is_load: bool,
}

/// Body of `/transactions`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionRecord>,
}

impl TransactionsResponse {
    pub fn into_transactions(self) -> Result<Vec<Transaction>, ModelError> {
        self.transactions.into_iter().map(Transaction::new).collect()
    }
}

/// Body of `/transactions/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub transaction: TransactionRecord,
}

// ============================================================================
// DERIVED VALUES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// API value with the legacy brand token replaced
    pub raw: String,
    /// First underscore shown as a space
    pub formatted: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notes {
    /// Text before the first newline
    pub short: String,
    pub full: String,
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransactionFlags {
    pub cash: bool,
    pub zero: bool,
    /// Zero-value event that does not count as spend (card checks and the like)
    pub meta_action: bool,
    pub pot: bool,
    pub pot_deposit: bool,
    pub pot_withdraw: bool,
    pub auto_coin_jar: bool,
    pub rounded: bool,
}

/// Resolved `merchant` field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MerchantRef<'a> {
    Absent,
    Unexpanded(&'a str),
    Expanded(&'a Merchant),
}

// ============================================================================
// TRANSACTION VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    record: TransactionRecord,
    created: DateTime<Utc>,
}

impl Transaction {
    /// Wrap a record, checking its amounts and creation timestamp
    pub fn new(record: TransactionRecord) -> Result<Self, ModelError> {
        Amount::new(amount_opts(&record))?;
        Amount::new(AmountOpts::domestic(record.account_balance, record.currency.as_str()))?;
        let created = parse_timestamp("created", &record.created)?;

        Ok(Transaction { record, created })
    }

    pub fn from_json(value: Value) -> Result<Self, ModelError> {
        let record: TransactionRecord = serde_json::from_value(value)?;
        Transaction::new(record)
    }

    pub fn record(&self) -> &TransactionRecord {
        &self.record
    }

    pub fn into_record(self) -> TransactionRecord {
        self.record
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn description(&self) -> &str {
        &self.record.description
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Settlement time, None while unsettled or unparseable
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.record
            .settled
            .as_deref()
            .and_then(|settled| parse_timestamp("settled", settled).ok())
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.record.counterparty
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.record.attachments
    }

    pub fn in_spending(&self) -> bool {
        self.record.include_in_spending
    }

    // ------------------------------------------------------------------------
    // Money
    // ------------------------------------------------------------------------

    /// Amount in the account currency, with the local value attached when foreign
    pub fn amount(&self) -> Amount {
        let opts = amount_opts(&self.record);
        Amount::from_parts(opts.domestic, opts.local)
    }

    /// Account balance after this transaction
    pub fn balance(&self) -> Amount {
        let opts = AmountOpts::domestic(self.record.account_balance, self.record.currency.as_str());
        Amount::from_parts(opts.domestic, None)
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    pub fn category(&self) -> Category {
        let raw = self.record.category.replacen("mondo", "monzo", 1);
        let formatted = raw.replacen('_', " ", 1);
        Category { raw, formatted }
    }

    pub fn declined(&self) -> bool {
        self.record.decline_reason.is_some()
    }

    /// Human-readable decline reason, e.g. `INVALID_CVC` -> `invalid CVC`
    pub fn decline_reason(&self) -> Option<String> {
        let reason = self.record.decline_reason.as_deref()?;

        let words: Vec<String> = reason
            .to_lowercase()
            .split('_')
            .map(|word| {
                if UPPERCASE_ABBREVIATIONS.contains(&word) {
                    word.to_uppercase()
                } else {
                    word.to_string()
                }
            })
            .collect();

        Some(words.join(" "))
    }

    /// First matching rule wins
    pub fn pending(&self) -> bool {
        if self.declined() {
            return false;
        }

        if self.is().cash {
            return false;
        }

        // Credits and zero amounts are exempt until current accounts settle them.
        if self.record.amount >= 0.0 {
            return false;
        }

        match self.record.settled.as_deref() {
            None => true,
            Some(settled) => settled.trim().is_empty(),
        }
    }

    /// `Pending`, or `Settled: <h:mma - Do MMMM YYYY>` in UTC
    pub fn settled_text(&self) -> String {
        if self.pending() {
            return "Pending".to_string();
        }

        match self.record.settled.as_deref().map(str::trim) {
            Some(settled) if !settled.is_empty() => match parse_timestamp("settled", settled) {
                Ok(time) => format!("Settled: {}", format_settled(&time)),
                Err(_) => format!("Settled: {}", settled),
            },
            _ => format!("Settled: {}", format_settled(&self.created)),
        }
    }

    pub fn is(&self) -> TransactionFlags {
        let metadata = &self.record.metadata;

        let cash = self.record.category == "cash";
        let zero = self.record.amount == 0.0;

        TransactionFlags {
            cash,
            zero,
            meta_action: zero && !self.in_spending(),
            pot: self.record.scheme == POT_SCHEME,
            pot_deposit: metadata.contains_key("pot_deposit_id"),
            pot_withdraw: metadata.contains_key("pot_withdrawal_id"),
            auto_coin_jar: metadata.get("trigger").and_then(Value::as_str) == Some("coin_jar"),
            rounded: metadata.contains_key("coin_jar_transaction"),
        }
    }

    pub fn hidden(&self) -> bool {
        self.record
            .metadata
            .get(HIDDEN_METADATA_KEY)
            .and_then(Value::as_str)
            == Some("true")
    }

    // ------------------------------------------------------------------------
    // Merchant & presentation
    // ------------------------------------------------------------------------

    pub fn merchant(&self) -> MerchantRef<'_> {
        match &self.record.merchant {
            None => MerchantRef::Absent,
            Some(MerchantField::Id(id)) if id.is_empty() => MerchantRef::Absent,
            Some(MerchantField::Id(id)) => MerchantRef::Unexpanded(id),
            Some(MerchantField::Expanded(merchant)) => MerchantRef::Expanded(merchant),
        }
    }

    fn expanded_merchant(&self) -> Option<&Merchant> {
        match self.merchant() {
            MerchantRef::Expanded(merchant) => Some(merchant),
            _ => None,
        }
    }

    /// Counterparty name, then merchant name, then the raw description
    pub fn display_name(&self) -> &str {
        self.record
            .counterparty
            .name()
            .or_else(|| self.expanded_merchant().and_then(Merchant::name))
            .unwrap_or(&self.record.description)
    }

    pub fn online(&self) -> bool {
        self.expanded_merchant().map_or(false, Merchant::online)
    }

    /// `Online`, the merchant's short address, or empty
    pub fn location(&self) -> String {
        match self.expanded_merchant() {
            Some(merchant) if merchant.online() => "Online".to_string(),
            Some(merchant) => merchant.short_address().unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    pub fn icon(&self) -> String {
        self.icon_with(&ClientConfig::default())
    }

    /// Top-up icon, merchant logo, peer icon, then the category icon
    pub fn icon_with(&self, config: &ClientConfig) -> String {
        if self.record.metadata.get("is_topup").map_or(false, is_truthy) {
            return config.icon_path("topup");
        }

        if let Some(logo) = self.expanded_merchant().and_then(Merchant::logo) {
            return logo.to_string();
        }

        if self.record.counterparty.user_id().is_some() {
            return config.icon_path("peer");
        }

        self.icon_fallback_with(config)
    }

    pub fn icon_fallback_with(&self, config: &ClientConfig) -> String {
        config.icon_path(&self.category().raw)
    }

    pub fn notes(&self) -> Notes {
        let full = self.record.notes.replace("%2B", "+");
        let short = full.split('\n').next().unwrap_or_default().to_string();
        Notes { short, full }
    }

    // ------------------------------------------------------------------------
    // Request descriptors
    // ------------------------------------------------------------------------

    /// Set one metadata key on this transaction
    pub fn annotate_request(&self, key: &str, value: impl Into<Value>) -> Request {
        Request::patch(format!("/transactions/{}", self.id()))
            .query("expand[]", "merchant")
            .body(format!("metadata[{}]", key), value)
    }

    pub fn set_notes_request(&self, notes: &str) -> Request {
        self.annotate_request("notes", notes)
    }

    pub fn hide_request(&self) -> Request {
        self.annotate_request(HIDDEN_METADATA_KEY, "true")
    }

    pub fn unhide_request(&self) -> Request {
        self.annotate_request(HIDDEN_METADATA_KEY, "")
    }

    pub fn attachment_upload_request(&self, content_type: &str) -> Request {
        Request::post("/attachment/upload")
            .body("file_name", format!("attachment.{}", file_extension(content_type)))
            .body("file_type", content_type)
    }

    pub fn attachment_register_request(&self, file_url: &str, content_type: &str) -> Request {
        Request::post("/attachment/register")
            .body("external_id", self.id())
            .body("file_url", file_url)
            .body("file_type", content_type)
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ModelError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(record)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn amount_opts(record: &TransactionRecord) -> AmountOpts {
    let opts = AmountOpts::domestic(record.amount, record.currency.as_str());

    if !record.local_currency.is_empty() && record.currency != record.local_currency {
        opts.with_local(record.local_amount, record.local_currency.as_str())
    } else {
        opts
    }
}

pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, ModelError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|time| time.with_timezone(&Utc))
        .map_err(|_| ModelError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// `9:05am - 1st January 2020`
fn format_settled(time: &DateTime<Utc>) -> String {
    let (pm, hour) = time.hour12();
    format!(
        "{}:{:02}{} - {} {}",
        hour,
        time.minute(),
        if pm { "pm" } else { "am" },
        ordinal(time.day()),
        time.format("%B %Y")
    )
}

/// Day of month with its English ordinal suffix
pub(crate) fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

/// Metadata values arrive as strings; `"false"` and `""` are both off
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn file_extension(content_type: &str) -> &str {
    match content_type.rsplit('/').next() {
        Some("jpeg") | None => "jpg",
        Some(subtype) => subtype,
    }
}

// ============================================================================
// TESTS
// ============================================================================
