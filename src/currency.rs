// 💱 Currency Table - minor-unit exponents and display metadata
//
// Most currencies split into 100 minor units. The exceptions below are fixed
// and drive every major/minor conversion in the crate.

use serde::Serialize;

/// Exponent used for any currency not in the exception table
pub const DEFAULT_EXPONENT: u32 = 2;

// ============================================================================
// EXPONENTS
// ============================================================================

/// Number of decimal places between major and minor units for `code`.
pub fn exponent(code: &str) -> u32 {
    match code {
        "BIF" | "CLP" | "CVE" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG"
        | "RWF" | "UGX" | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "MGA" | "MRU" => 1,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        "CLF" => 4,
        _ => DEFAULT_EXPONENT,
    }
}

/// Number of minor units in one major unit (`10^exponent`).
pub fn scale(code: &str) -> u64 {
    10u64.pow(exponent(code))
}

// ============================================================================
// DISPLAY METADATA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyDefinition<'a> {
    pub symbol: &'a str,
    /// Decimal separator between major and minor parts
    pub separator: &'a str,
}

impl CurrencyDefinition<'_> {
    /// Digit grouping character that pairs with the decimal separator
    pub fn group_separator(&self) -> &'static str {
        if self.separator == "," {
            "."
        } else {
            ","
        }
    }
}

/// Symbol and separator for `code`; unknown codes display as themselves.
pub fn definition(code: &str) -> CurrencyDefinition<'_> {
    let (symbol, separator) = match code {
        "GBP" => ("£", "."),
        "USD" => ("$", "."),
        "EUR" => ("€", "."),
        "JPY" => ("¥", "."),
        "CNY" => ("¥", "."),
        "INR" => ("₹", "."),
        "KRW" => ("₩", "."),
        "AUD" => ("A$", "."),
        "CAD" => ("CA$", "."),
        "NZD" => ("NZ$", "."),
        "HKD" => ("HK$", "."),
        "SGD" => ("S$", "."),
        "CHF" => ("CHF", "."),
        "ILS" => ("₪", "."),
        "THB" => ("฿", "."),
        "SEK" | "NOK" | "DKK" | "ISK" => ("kr", ","),
        "PLN" => ("zł", ","),
        "CZK" => ("Kč", ","),
        "BRL" => ("R$", ","),
        "ZAR" => ("R", ","),
        "TRY" => ("₺", ","),
        "VND" => ("₫", ","),
        _ => return CurrencyDefinition { symbol: code, separator: "." },
    };

    CurrencyDefinition { symbol, separator }
}
