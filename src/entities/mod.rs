// API entity wrappers
// Each record mirrors the wire format and adds typed accessors plus the
// request descriptors scoped to it.

use serde::{Deserialize, Deserializer};

pub mod account;
pub mod attachment;
pub mod balance;
pub mod merchant;
pub mod pot;

pub use account::{accounts_request, paginate, Account, AccountsResponse, Pagination, Since};
pub use attachment::{Attachment, AttachmentEnvelope, AttachmentUploadResponse};
pub use balance::{extract_balance_and_spent, BalanceResponse, BalanceSummary, LocalSpend};
pub use merchant::{Merchant, MerchantAddress};
pub use pot::{pot_request, pots_request, Pot, PotDeposit, PotWithdrawal, PotsResponse};

/// Wire fields the API sends as `null` read as their default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
