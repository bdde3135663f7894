// 💷 Amount - money as minor units + currency
//
// An Amount is immutable: a domestic (account currency) value and, for foreign
// spend, the local value charged at the point of sale. Display math is driven
// entirely by the currency exponent table.
//
// Sign convention: zero counts as negative. Meta-action detection elsewhere
// relies on this.

use crate::currency::{self, CurrencyDefinition};
use crate::error::{CurrencyMismatchError, InvalidAmountError};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// Template used by `Display`: sign, symbol, normalized amount (`+£1.23`)
pub const DEFAULT_TEMPLATE: &str = "%s%y%n";

/// Largest float that still round-trips through an i64 exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ============================================================================
// OPTIONS OBJECT (wire shape)
// ============================================================================

/// A value in minor units of a single currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleAmount {
    /// Minor units (pence, cents). Fractional values are kept as-is.
    #[serde(serialize_with = "serialize_minor_units")]
    pub amount: f64,

    /// Three-letter currency code
    pub currency: String,
}

impl SimpleAmount {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        SimpleAmount {
            amount,
            currency: currency.into(),
        }
    }

    fn validate(
        &self,
        amount_error: InvalidAmountError,
        currency_error: InvalidAmountError,
    ) -> Result<(), InvalidAmountError> {
        if !self.amount.is_finite() {
            return Err(amount_error);
        }
        if self.currency.is_empty() {
            return Err(currency_error);
        }
        Ok(())
    }

    fn from_map(
        map: &Map<String, Value>,
        amount_error: InvalidAmountError,
        currency_error: InvalidAmountError,
    ) -> Result<Self, InvalidAmountError> {
        let amount = map
            .get("amount")
            .and_then(Value::as_f64)
            .ok_or_else(|| amount_error.clone())?;
        let currency = map
            .get("currency")
            .and_then(Value::as_str)
            .ok_or_else(|| currency_error.clone())?;

        let simple = SimpleAmount::new(amount, currency);
        simple.validate(amount_error, currency_error)?;
        Ok(simple)
    }

    fn to_json(&self) -> Value {
        json!({
            "amount": minor_units_json(self.amount),
            "currency": self.currency,
        })
    }
}

/// Constructor options for `Amount`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountOpts {
    pub domestic: SimpleAmount,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<SimpleAmount>,
}

impl AmountOpts {
    /// Options with only a domestic value
    pub fn domestic(amount: f64, currency: impl Into<String>) -> Self {
        AmountOpts {
            domestic: SimpleAmount::new(amount, currency),
            local: None,
        }
    }

    /// Attach the point-of-sale value
    pub fn with_local(mut self, amount: f64, currency: impl Into<String>) -> Self {
        self.local = Some(SimpleAmount::new(amount, currency));
        self
    }
}

fn serialize_minor_units<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// JSON number for a minor-unit count; integral values stay integers
pub(crate) fn minor_units_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

// ============================================================================
// FORMAT TOKENS
// ============================================================================

/// Substitution tokens understood by `Amount::format`. Each is written as `%` + marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    /// `%s` - `+` or `-`
    Sign,
    /// `%c` - currency code
    CurrencyCode,
    /// `%y` - currency symbol
    Symbol,
    /// `%+` - `+` when positive, otherwise empty
    SignIfPositive,
    /// `%-` - `-` when negative, otherwise empty
    SignIfNegative,
    /// `%r` - raw signed minor units
    Raw,
    /// `%a` - magnitude in major units, full precision
    Amount,
    /// `%n` - magnitude rounded to the currency's minor unit
    Normalized,
    /// `%j` - major part
    Major,
    /// `%m` - minor part
    Minor,
    /// `%p` - decimal separator
    Separator,
}

impl FormatToken {
    pub const ALL: [FormatToken; 11] = [
        FormatToken::Sign,
        FormatToken::CurrencyCode,
        FormatToken::Symbol,
        FormatToken::SignIfPositive,
        FormatToken::SignIfNegative,
        FormatToken::Raw,
        FormatToken::Amount,
        FormatToken::Normalized,
        FormatToken::Major,
        FormatToken::Minor,
        FormatToken::Separator,
    ];

    pub fn marker(self) -> char {
        match self {
            FormatToken::Sign => 's',
            FormatToken::CurrencyCode => 'c',
            FormatToken::Symbol => 'y',
            FormatToken::SignIfPositive => '+',
            FormatToken::SignIfNegative => '-',
            FormatToken::Raw => 'r',
            FormatToken::Amount => 'a',
            FormatToken::Normalized => 'n',
            FormatToken::Major => 'j',
            FormatToken::Minor => 'm',
            FormatToken::Separator => 'p',
        }
    }

    pub fn from_marker(marker: char) -> Option<FormatToken> {
        FormatToken::ALL
            .into_iter()
            .find(|token| token.marker() == marker)
    }
}

// ============================================================================
// STRUCTURED PARTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignMode {
    #[default]
    Always,
    OnlyPositive,
    OnlyNegative,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub show_currency: bool,
    pub sign_mode: SignMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            show_currency: true,
            sign_mode: SignMode::Always,
        }
    }
}

impl FormatOptions {
    fn shows(&self, kind: PartKind) -> bool {
        match kind {
            PartKind::Currency => self.show_currency,
            PartKind::PlusSign => {
                matches!(self.sign_mode, SignMode::Always | SignMode::OnlyPositive)
            }
            PartKind::MinusSign => {
                matches!(self.sign_mode, SignMode::Always | SignMode::OnlyNegative)
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PartKind {
    PlusSign,
    MinusSign,
    Currency,
    Integer,
    Group,
    Decimal,
    Fraction,
}

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::PlusSign => "plusSign",
            PartKind::MinusSign => "minusSign",
            PartKind::Currency => "currency",
            PartKind::Integer => "integer",
            PartKind::Group => "group",
            PartKind::Decimal => "decimal",
            PartKind::Fraction => "fraction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountPart {
    pub kind: PartKind,
    pub value: String,
}

impl AmountPart {
    fn new(kind: PartKind, value: impl Into<String>) -> Self {
        AmountPart {
            kind,
            value: value.into(),
        }
    }
}

// ============================================================================
// AMOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AmountOpts", into = "AmountOpts")]
pub struct Amount {
    domestic: SimpleAmount,
    local: Option<SimpleAmount>,
}

impl Amount {
    /// Validate options and build an Amount
    pub fn new(opts: AmountOpts) -> Result<Self, InvalidAmountError> {
        opts.domestic.validate(
            InvalidAmountError::InvalidDomesticAmount,
            InvalidAmountError::InvalidDomesticCurrency,
        )?;
        if let Some(local) = &opts.local {
            local.validate(
                InvalidAmountError::InvalidLocalAmount,
                InvalidAmountError::InvalidLocalCurrency,
            )?;
        }

        Ok(Amount::from_parts(opts.domestic, opts.local))
    }

    /// Domestic-only amount
    pub fn from_minor(amount: f64, currency: &str) -> Result<Self, InvalidAmountError> {
        Amount::new(AmountOpts::domestic(amount, currency))
    }

    /// Validate an untyped options value, reporting which path failed
    pub fn from_json(value: &Value) -> Result<Self, InvalidAmountError> {
        let opts = value.as_object().ok_or(InvalidAmountError::NotAnObject)?;

        let domestic = opts
            .get("domestic")
            .and_then(Value::as_object)
            .ok_or(InvalidAmountError::MissingDomestic)?;
        let domestic = SimpleAmount::from_map(
            domestic,
            InvalidAmountError::InvalidDomesticAmount,
            InvalidAmountError::InvalidDomesticCurrency,
        )?;

        let local = match opts.get("local") {
            None | Some(Value::Null) => None,
            Some(Value::Object(local)) => Some(SimpleAmount::from_map(
                local,
                InvalidAmountError::InvalidLocalAmount,
                InvalidAmountError::InvalidLocalCurrency,
            )?),
            Some(_) => return Err(InvalidAmountError::InvalidLocal),
        };

        Ok(Amount::from_parts(domestic, local))
    }

    /// Build from parts already known to be valid
    pub(crate) fn from_parts(domestic: SimpleAmount, local: Option<SimpleAmount>) -> Self {
        Amount { domestic, local }
    }

    pub fn domestic(&self) -> &SimpleAmount {
        &self.domestic
    }

    pub fn local(&self) -> Option<&SimpleAmount> {
        self.local.as_ref()
    }

    pub fn currency(&self) -> &str {
        &self.domestic.currency
    }

    /// True when a point-of-sale value in another currency is attached
    pub fn foreign(&self) -> bool {
        self.local.is_some()
    }

    /// The local value as an Amount of its own
    pub fn exchanged(&self) -> Option<Amount> {
        self.local
            .as_ref()
            .map(|local| Amount::from_parts(local.clone(), None))
    }

    pub fn negative(&self) -> bool {
        self.domestic.amount <= 0.0
    }

    pub fn positive(&self) -> bool {
        !self.negative()
    }

    pub fn sign(&self) -> &'static str {
        if self.negative() {
            "-"
        } else {
            "+"
        }
    }

    pub fn sign_if_positive(&self) -> &'static str {
        if self.positive() {
            "+"
        } else {
            ""
        }
    }

    pub fn sign_if_negative(&self) -> &'static str {
        if self.negative() {
            "-"
        } else {
            ""
        }
    }

    /// Magnitude in major units, unrounded
    pub fn amount(&self) -> f64 {
        self.domestic.amount.abs() / self.scale() as f64
    }

    pub fn exponent(&self) -> u32 {
        currency::exponent(self.currency())
    }

    pub fn scale(&self) -> u64 {
        currency::scale(self.currency())
    }

    /// Signed minor units exactly as received
    pub fn raw(&self) -> f64 {
        self.domestic.amount
    }

    /// Numeric coercion: signed minor units, not the display magnitude
    pub fn numeric_value(&self) -> f64 {
        self.raw()
    }

    fn definition(&self) -> CurrencyDefinition<'_> {
        currency::definition(self.currency())
    }

    pub fn symbol(&self) -> &str {
        self.definition().symbol
    }

    pub fn separator(&self) -> &str {
        self.definition().separator
    }

    // ------------------------------------------------------------------------
    // Normalized display
    // ------------------------------------------------------------------------

    /// Major and minor parts of the magnitude rounded to whole minor units.
    /// The minor part is zero-padded to the exponent and empty for 0-exponent currencies.
    /// Works in f64 throughout so magnitudes beyond the integer types still render.
    pub fn split(&self) -> (String, String) {
        let units = self.domestic.amount.abs().round();
        let scale = self.scale() as f64;
        let width = self.exponent() as usize;

        let remainder = units % scale;
        let major = format!("{:.0}", (units - remainder) / scale);
        let minor = if width == 0 {
            String::new()
        } else {
            format!("{:0width$.0}", remainder, width = width)
        };

        (major, minor)
    }

    pub fn major(&self) -> String {
        self.split().0
    }

    pub fn minor(&self) -> String {
        self.split().1
    }

    pub fn normalize(&self) -> String {
        let (major, minor) = self.split();
        if minor.is_empty() {
            major
        } else {
            format!("{}{}{}", major, self.separator(), minor)
        }
    }

    // ------------------------------------------------------------------------
    // Template formatting
    // ------------------------------------------------------------------------

    pub fn token_value(&self, token: FormatToken) -> String {
        match token {
            FormatToken::Sign => self.sign().to_string(),
            FormatToken::CurrencyCode => self.currency().to_string(),
            FormatToken::Symbol => self.symbol().to_string(),
            FormatToken::SignIfPositive => self.sign_if_positive().to_string(),
            FormatToken::SignIfNegative => self.sign_if_negative().to_string(),
            FormatToken::Raw => self.raw().to_string(),
            FormatToken::Amount => self.amount().to_string(),
            FormatToken::Normalized => self.normalize(),
            FormatToken::Major => self.major(),
            FormatToken::Minor => self.minor(),
            FormatToken::Separator => self.separator().to_string(),
        }
    }

    /// Replace every `%<marker>` token in `template`. Unknown markers are left untouched.
    pub fn format(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 8);
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }

            match chars.peek().copied().and_then(FormatToken::from_marker) {
                Some(token) => {
                    out.push_str(&self.token_value(token));
                    chars.next();
                }
                None => out.push('%'),
            }
        }

        out
    }

    // ------------------------------------------------------------------------
    // Structured formatting
    // ------------------------------------------------------------------------

    pub fn format_parts(&self, opts: &FormatOptions) -> Vec<AmountPart> {
        let definition = self.definition();
        let (major, minor) = self.split();

        let mut parts = Vec::new();
        if self.positive() {
            parts.push(AmountPart::new(PartKind::PlusSign, "+"));
        } else {
            parts.push(AmountPart::new(PartKind::MinusSign, "\u{2212}"));
        }
        parts.push(AmountPart::new(PartKind::Currency, definition.symbol));

        for (i, group) in digit_groups(&major).into_iter().enumerate() {
            if i > 0 {
                parts.push(AmountPart::new(PartKind::Group, definition.group_separator()));
            }
            parts.push(AmountPart::new(PartKind::Integer, group));
        }

        if !minor.is_empty() {
            parts.push(AmountPart::new(PartKind::Decimal, definition.separator));
            parts.push(AmountPart::new(PartKind::Fraction, minor));
        }

        parts.retain(|part| opts.shows(part.kind));
        parts
    }

    pub fn format_with(&self, opts: &FormatOptions) -> String {
        self.format_parts(opts)
            .into_iter()
            .map(|part| part.value)
            .collect()
    }

    /// Parts wrapped in `amount__<kind>` spans for styling
    pub fn to_html(&self, opts: &FormatOptions) -> String {
        let inner: String = self
            .format_parts(opts)
            .iter()
            .map(|part| {
                format!(
                    "<span class=\"amount__{}\">{}</span>",
                    part.kind.as_str(),
                    escape_html(&part.value)
                )
            })
            .collect();

        format!(
            "<span class=\"amount\" data-positive=\"{}\" data-currency=\"{}\">{}</span>",
            if self.positive() { "positive" } else { "negative" },
            escape_html(self.currency()),
            inner
        )
    }

    // ------------------------------------------------------------------------
    // Arithmetic & representation
    // ------------------------------------------------------------------------

    /// Sum of two same-currency amounts. The result never carries a local value.
    pub fn add(&self, other: &Amount) -> Result<Amount, CurrencyMismatchError> {
        if self.currency() != other.currency() {
            return Err(CurrencyMismatchError {
                left: self.currency().to_string(),
                right: other.currency().to_string(),
            });
        }

        Ok(Amount::from_parts(
            SimpleAmount::new(self.raw() + other.raw(), self.currency()),
            None,
        ))
    }

    /// Options that rebuild this amount
    pub fn to_opts(&self) -> AmountOpts {
        AmountOpts {
            domestic: self.domestic.clone(),
            local: self.local.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({ "domestic": self.domestic.to_json() });
        if let (Some(local), Some(map)) = (&self.local, value.as_object_mut()) {
            map.insert("local".to_string(), local.to_json());
        }
        value
    }

    pub fn stringify(&self) -> String {
        self.to_json().to_string()
    }
}

impl TryFrom<AmountOpts> for Amount {
    type Error = InvalidAmountError;

    fn try_from(opts: AmountOpts) -> Result<Self, Self::Error> {
        Amount::new(opts)
    }
}

impl From<Amount> for AmountOpts {
    fn from(amount: Amount) -> Self {
        AmountOpts {
            domestic: amount.domestic,
            local: amount.local,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_TEMPLATE))
    }
}

/// Split ASCII digits into thousands groups, leading group shortest
fn digit_groups(digits: &str) -> Vec<&str> {
    let head = match digits.len() % 3 {
        0 => digits.len().min(3),
        n => n,
    };

    let mut groups = vec![&digits[..head]];
    let mut rest = &digits[head..];
    while !rest.is_empty() {
        groups.push(&rest[..3]);
        rest = &rest[3..];
    }
    groups
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn gbp(minor: f64) -> Amount {
        Amount::from_minor(minor, "GBP").unwrap()
    }

    fn foreign() -> Amount {
        Amount::new(AmountOpts::domestic(123.0, "GBP").with_local(234.0, "USD")).unwrap()
    }

    #[test]
    fn test_rejects_malformed_options() {
        let cases = [
            (json!(null), InvalidAmountError::NotAnObject),
            (json!(123), InvalidAmountError::NotAnObject),
            (json!("£12.30"), InvalidAmountError::NotAnObject),
            (json!({}), InvalidAmountError::MissingDomestic),
            (json!({ "domestic": 5 }), InvalidAmountError::MissingDomestic),
            (json!({ "domestic": {} }), InvalidAmountError::InvalidDomesticAmount),
            (
                json!({ "domestic": { "amount": 123 } }),
                InvalidAmountError::InvalidDomesticCurrency,
            ),
            (
                json!({ "domestic": { "currency": "GBP" } }),
                InvalidAmountError::InvalidDomesticAmount,
            ),
            (
                json!({ "domestic": { "amount": "123", "currency": "GBP" } }),
                InvalidAmountError::InvalidDomesticAmount,
            ),
            (
                json!({ "domestic": { "amount": 123, "currency": 1 } }),
                InvalidAmountError::InvalidDomesticCurrency,
            ),
            (
                json!({ "domestic": { "amount": 123, "currency": "GBP" }, "local": {} }),
                InvalidAmountError::InvalidLocalAmount,
            ),
            (
                json!({ "domestic": { "amount": 123, "currency": "GBP" }, "local": { "amount": 123 } }),
                InvalidAmountError::InvalidLocalCurrency,
            ),
            (
                json!({ "domestic": { "amount": 123, "currency": "GBP" }, "local": { "amount": "1", "currency": "GBP" } }),
                InvalidAmountError::InvalidLocalAmount,
            ),
            (
                json!({ "domestic": { "amount": 123, "currency": "GBP" }, "local": { "amount": 1, "currency": 1 } }),
                InvalidAmountError::InvalidLocalCurrency,
            ),
            (
                json!({ "domestic": { "amount": 123, "currency": "GBP" }, "local": "USD" }),
                InvalidAmountError::InvalidLocal,
            ),
        ];

        for (value, expected) in cases {
            assert_eq!(Amount::from_json(&value), Err(expected), "input: {}", value);
        }
    }

    #[test]
    fn test_typed_constructor_validation() {
        assert_eq!(
            Amount::new(AmountOpts::domestic(f64::NAN, "GBP")),
            Err(InvalidAmountError::InvalidDomesticAmount)
        );
        assert_eq!(
            Amount::new(AmountOpts::domestic(1.0, "")),
            Err(InvalidAmountError::InvalidDomesticCurrency)
        );
        assert_eq!(
            Amount::new(AmountOpts::domestic(1.0, "GBP").with_local(1.0, "")),
            Err(InvalidAmountError::InvalidLocalCurrency)
        );
    }

    #[test]
    fn test_null_local_is_absent() {
        let amount =
            Amount::from_json(&json!({ "domestic": { "amount": 5, "currency": "GBP" }, "local": null }))
                .unwrap();
        assert!(!amount.foreign());
    }

    #[test]
    fn test_amount_is_unrounded_major_units() {
        assert_eq!(gbp(123.0).amount(), 1.23);
        assert_eq!(gbp(123.75).amount(), 1.2375);
        assert!((gbp(123.567).amount() - 1.23567).abs() < 1e-12);
        assert_eq!(gbp(-123.0).amount(), 1.23);
        assert_eq!(Amount::from_minor(1500.0, "JPY").unwrap().amount(), 1500.0);
        assert_eq!(Amount::from_minor(1234.0, "KWD").unwrap().amount(), 1.234);
    }

    #[test]
    fn test_sign_convention() {
        let positive = gbp(123.0);
        assert!(!positive.negative());
        assert!(positive.positive());
        assert_eq!(positive.sign(), "+");
        assert_eq!(positive.sign_if_positive(), "+");
        assert_eq!(positive.sign_if_negative(), "");

        let zero = gbp(0.0);
        assert!(zero.negative());
        assert_eq!(zero.sign(), "-");

        let negative = gbp(-123.0);
        assert!(negative.negative());
        assert_eq!(negative.sign_if_positive(), "");
        assert_eq!(negative.sign_if_negative(), "-");
    }

    #[test]
    fn test_raw_and_numeric_value_keep_sign() {
        assert_eq!(gbp(-123.0).raw(), -123.0);
        assert_eq!(gbp(-123.0).numeric_value(), -123.0);
        assert_eq!(gbp(123.567).raw(), 123.567);
    }

    #[test]
    fn test_foreign_and_exchanged() {
        assert!(!gbp(123.0).foreign());
        assert!(gbp(123.0).exchanged().is_none());

        let amount = foreign();
        assert!(amount.foreign());

        let exchanged = amount.exchanged().unwrap();
        assert_eq!(exchanged.domestic(), &SimpleAmount::new(234.0, "USD"));
        assert!(exchanged.local().is_none());
        assert!(!exchanged.foreign());
    }

    #[test]
    fn test_normalize_and_split() {
        assert_eq!(gbp(123.0).normalize(), "1.23");
        assert_eq!(gbp(123.75).normalize(), "1.24");
        assert_eq!(gbp(123.567).normalize(), "1.24");
        assert_eq!(gbp(5.0).split(), ("0".to_string(), "05".to_string()));
        assert_eq!(gbp(123.75).major(), "1");
        assert_eq!(gbp(123.75).minor(), "24");

        let yen = Amount::from_minor(1500.0, "JPY").unwrap();
        assert_eq!(yen.split(), ("1500".to_string(), String::new()));
        assert_eq!(yen.normalize(), "1500");

        let dinar = Amount::from_minor(-1005.0, "KWD").unwrap();
        assert_eq!(dinar.normalize(), "1.005");
    }

    #[test]
    fn test_normalize_beyond_integer_range() {
        let huge = gbp(-1e20);
        assert_eq!(huge.split(), ("1000000000000000000".to_string(), "00".to_string()));
        assert_eq!(huge.normalize(), "1000000000000000000.00");
        assert_eq!(
            Amount::from_minor(1e20, "JPY").unwrap().to_string(),
            "+¥100000000000000000000"
        );
    }

    #[test]
    fn test_format_template() {
        assert_eq!(gbp(123.0).format(DEFAULT_TEMPLATE), "+£1.23");
        assert_eq!(gbp(-123450.0).to_string(), "-£1234.50");
        assert_eq!(gbp(0.0).to_string(), "-£0.00");
        assert_eq!(gbp(-250.0).format("%-%c %j%p%m"), "-GBP 2.50");
        assert_eq!(gbp(250.0).format("%+%a %r"), "+2.5 250");
        assert_eq!(gbp(250.0).format("%s%s"), "++");
    }

    #[test]
    fn test_format_leaves_unknown_tokens() {
        assert_eq!(gbp(100.0).format("%z %n%"), "%z 1.00%");
        assert_eq!(gbp(100.0).format("no tokens"), "no tokens");
        assert_eq!(gbp(100.0).format("%%n"), "%1.00");
    }

    #[test]
    fn test_format_parts() {
        let amount = gbp(-123456789.0);
        let parts = amount.format_parts(&FormatOptions::default());
        let kinds: Vec<PartKind> = parts.iter().map(|part| part.kind).collect();

        assert_eq!(
            kinds,
            vec![
                PartKind::MinusSign,
                PartKind::Currency,
                PartKind::Integer,
                PartKind::Group,
                PartKind::Integer,
                PartKind::Group,
                PartKind::Integer,
                PartKind::Decimal,
                PartKind::Fraction,
            ]
        );
        assert_eq!(amount.format_with(&FormatOptions::default()), "\u{2212}£1,234,567.89");
    }

    #[test]
    fn test_format_with_sign_modes() {
        let hidden_currency = FormatOptions {
            show_currency: false,
            sign_mode: SignMode::OnlyNegative,
        };
        assert_eq!(gbp(150.0).format_with(&hidden_currency), "1.50");
        assert_eq!(gbp(-150.0).format_with(&hidden_currency), "\u{2212}1.50");

        let never = FormatOptions {
            show_currency: true,
            sign_mode: SignMode::Never,
        };
        assert_eq!(Amount::from_minor(150000.0, "JPY").unwrap().format_with(&never), "¥150,000");

        let only_positive = FormatOptions {
            show_currency: true,
            sign_mode: SignMode::OnlyPositive,
        };
        assert_eq!(gbp(-150.0).format_with(&only_positive), "£1.50");
    }

    #[test]
    fn test_html() {
        let html = gbp(123.0).to_html(&FormatOptions::default());
        assert!(html.starts_with("<span class=\"amount\" data-positive=\"positive\" data-currency=\"GBP\">"));
        assert!(html.contains("<span class=\"amount__plusSign\">+</span>"));
        assert!(html.contains("<span class=\"amount__fraction\">23</span>"));
    }

    #[test]
    fn test_add() {
        let a = gbp(-500.0);
        let b = gbp(-250.0);
        let c = gbp(100.0);

        assert_eq!(a.add(&b).unwrap().raw(), -750.0);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        assert_eq!(
            a.add(&b).unwrap().add(&c).unwrap(),
            a.add(&b.add(&c).unwrap()).unwrap()
        );

        let summed = foreign().add(&gbp(1.0)).unwrap();
        assert!(!summed.foreign());
    }

    #[test]
    fn test_add_rejects_currency_mismatch() {
        let usd = Amount::from_minor(100.0, "USD").unwrap();
        let err = gbp(100.0).add(&usd).unwrap_err();
        assert_eq!(err.left, "GBP");
        assert_eq!(err.right, "USD");
    }

    #[test]
    fn test_options_round_trip() {
        let amount = foreign();
        assert_eq!(Amount::new(amount.to_opts()).unwrap(), amount);

        assert_eq!(
            gbp(123.0).stringify(),
            r#"{"domestic":{"amount":123,"currency":"GBP"}}"#
        );
        assert_eq!(
            amount.stringify(),
            r#"{"domestic":{"amount":123,"currency":"GBP"},"local":{"amount":234,"currency":"USD"}}"#
        );
        assert_eq!(
            gbp(123.75).stringify(),
            r#"{"domestic":{"amount":123.75,"currency":"GBP"}}"#
        );
    }

    #[test]
    fn test_serde_validates_and_round_trips() {
        let amount = foreign();
        let encoded = serde_json::to_value(&amount).unwrap();
        assert_eq!(encoded, amount.to_json());

        let decoded: Amount = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, amount);

        let invalid = serde_json::from_value::<Amount>(json!({
            "domestic": { "amount": 1, "currency": "" }
        }));
        assert!(invalid.is_err());
    }
}
