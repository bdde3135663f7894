// Monzo client model library
// Typed wrappers over API payloads: money values, transactions, grouping and
// the request descriptors an HTTP executor sends. No I/O happens here.

pub mod error;
pub mod config;
pub mod currency;
pub mod amount;
pub mod request;
pub mod auth;
pub mod transaction;
pub mod grouping;
pub mod entities;

// Re-export commonly used types
pub use error::{
    AuthError, CurrencyMismatchError, EmptyGroupError,
    InvalidAmountError, ModelError, UnknownStrategyError,
};
pub use config::ClientConfig;
pub use amount::{
    Amount, AmountOpts, AmountPart, FormatOptions, FormatToken, PartKind, SignMode, SimpleAmount,
};
pub use request::{HttpMethod, Params, Request};
pub use auth::{
    access_token_request, auth_request_url, parse_auth_url, refresh_access_request,
    verify_access_request, AccessResponse, AppInfo, AuthTokenPair, WhoAmIResponse,
};
pub use transaction::{
    Category, Counterparty, MerchantField, MerchantRef, Notes, Transaction, TransactionFlags,
    TransactionRecord, TransactionsResponse,
};
pub use grouping::{
    group_title, group_title_in, group_transactions, group_transactions_in, sum_group,
    GroupingStrategy, TransactionGroup,
};
pub use entities::{
    extract_balance_and_spent, Account, Attachment, BalanceResponse, BalanceSummary, Merchant,
    Pagination, Pot, Since,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
