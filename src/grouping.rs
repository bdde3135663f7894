// 🗂️ Grouping & Aggregation - partition a feed and summarise each group
//
// Groups keep the order in which their keys first appear, and members keep
// their input order. Day boundaries and relative titles take the timezone and
// current time as parameters so results are deterministic.

use crate::amount::{Amount, SimpleAmount};
use crate::error::{EmptyGroupError, UnknownStrategyError};
use crate::transaction::{ordinal, MerchantRef, Transaction};
use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const CONTACTS_GROUP: &str = "monzo-contacts";
pub const TOP_UPS_GROUP: &str = "top-ups";
pub const UNSORTED_GROUP: &str = "unsorted";

const MINUTES_PER_DAY: u32 = 24 * 60;

// ============================================================================
// STRATEGY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStrategy {
    /// Calendar day of `created`
    Day,
    /// Formatted category
    Category,
    /// Merchant group, peers, or top-ups
    Merchant,
    /// Everything in one group
    #[default]
    None,
}

impl GroupingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingStrategy::Day => "day",
            GroupingStrategy::Category => "category",
            GroupingStrategy::Merchant => "merchant",
            GroupingStrategy::None => "none",
        }
    }
}

impl fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingStrategy {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(GroupingStrategy::Day),
            "category" => Ok(GroupingStrategy::Category),
            "merchant" => Ok(GroupingStrategy::Merchant),
            "none" => Ok(GroupingStrategy::None),
            _ => Err(UnknownStrategyError(s.to_string())),
        }
    }
}

// ============================================================================
// GROUP
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionGroup<'a> {
    /// Key shared by every member
    pub id: String,
    pub strategy: GroupingStrategy,
    pub members: Vec<&'a Transaction>,
}

impl<'a> TransactionGroup<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn title(&self, now: DateTime<Utc>) -> String {
        group_title(self, now)
    }

    pub fn sum(&self) -> Result<Amount, EmptyGroupError> {
        sum_group(&self.members)
    }
}

// ============================================================================
// PARTITIONING
// ============================================================================

/// Key of `tx` under `strategy`, with day boundaries taken in `tz`
pub fn group_key<Tz: TimeZone>(tx: &Transaction, strategy: GroupingStrategy, tz: &Tz) -> String {
    match strategy {
        GroupingStrategy::Day => start_of_day(tx.created(), tz),
        GroupingStrategy::Category => tx.category().formatted,
        GroupingStrategy::Merchant => match tx.merchant() {
            MerchantRef::Expanded(merchant) => merchant.group_id().to_string(),
            MerchantRef::Unexpanded(id) => id.to_string(),
            MerchantRef::Absent if tx.counterparty().user_id().is_some() => {
                CONTACTS_GROUP.to_string()
            }
            MerchantRef::Absent => TOP_UPS_GROUP.to_string(),
        },
        GroupingStrategy::None => UNSORTED_GROUP.to_string(),
    }
}

/// ISO timestamp (UTC, millisecond precision) of the start of `time`'s day in `tz`
fn start_of_day<Tz: TimeZone>(time: DateTime<Utc>, tz: &Tz) -> String {
    let day = time.with_timezone(tz).date_naive();
    let start = first_instant(day, tz).unwrap_or(time);

    start.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// First local minute of `day` that exists in `tz`. Midnight is skipped on
/// days where a DST transition jumps over it.
fn first_instant<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    (0..MINUTES_PER_DAY).find_map(|minute| {
        let local = day.and_hms_opt(minute / 60, minute % 60, 0)?;
        tz.from_local_datetime(&local)
            .earliest()
            .map(|start| start.with_timezone(&Utc))
    })
}

/// Partition transactions by `strategy`, using UTC day boundaries
pub fn group_transactions<'a, I>(txs: I, strategy: GroupingStrategy) -> Vec<TransactionGroup<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    group_transactions_in(txs, strategy, &Utc)
}

/// Partition transactions by `strategy`, using day boundaries in `tz`
pub fn group_transactions_in<'a, I, Tz>(
    txs: I,
    strategy: GroupingStrategy,
    tz: &Tz,
) -> Vec<TransactionGroup<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
    Tz: TimeZone,
{
    let mut groups: Vec<TransactionGroup<'a>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut count = 0usize;

    for tx in txs {
        count += 1;
        let key = group_key(tx, strategy, tz);

        match positions.get(&key) {
            Some(&position) => groups[position].members.push(tx),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(TransactionGroup {
                    id: key,
                    strategy,
                    members: vec![tx],
                });
            }
        }
    }

    debug!(
        strategy = strategy.as_str(),
        transactions = count,
        groups = groups.len(),
        "grouped transactions"
    );

    groups
}

// ============================================================================
// TITLES
// ============================================================================

pub fn group_title(group: &TransactionGroup<'_>, now: DateTime<Utc>) -> String {
    group_title_in(group, now, &Utc)
}

/// Human title for a group. Day titles are relative to `now` in `tz`.
pub fn group_title_in<Tz: TimeZone>(
    group: &TransactionGroup<'_>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> String {
    match group.strategy {
        GroupingStrategy::Day => day_title(&group.id, now, tz),
        GroupingStrategy::Category => group
            .members
            .first()
            .map(|tx| tx.category().formatted)
            .unwrap_or_default(),
        GroupingStrategy::Merchant => group
            .members
            .first()
            .map(|tx| merchant_title(tx))
            .unwrap_or_default(),
        GroupingStrategy::None => "Unsorted".to_string(),
    }
}

fn day_title<Tz: TimeZone>(id: &str, now: DateTime<Utc>, tz: &Tz) -> String {
    let Ok(start) = DateTime::parse_from_rfc3339(id) else {
        return id.to_string();
    };

    let day = start.with_timezone(tz).date_naive();
    let today = now.with_timezone(tz).date_naive();

    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else if day.year() == today.year() {
        long_date(&day)
    } else {
        format!("{} {}", long_date(&day), day.year())
    }
}

/// `Wednesday, 1st January`
fn long_date(day: &NaiveDate) -> String {
    format!(
        "{}, {} {}",
        day.format("%A"),
        ordinal(day.day()),
        day.format("%B")
    )
}

fn merchant_title(tx: &Transaction) -> String {
    match tx.merchant() {
        MerchantRef::Expanded(merchant) => merchant.name().unwrap_or(tx.description()).to_string(),
        MerchantRef::Unexpanded(id) => id.to_string(),
        MerchantRef::Absent if tx.counterparty().user_id().is_some() => {
            "Monzo Contacts".to_string()
        }
        MerchantRef::Absent => "Top Ups".to_string(),
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Total spend of a group: meta-actions are dropped unless declined, credits are
/// dropped, and the raw minor units of the rest are summed in the first member's
/// currency. Members in other currencies contribute their raw value unconverted.
pub fn sum_group(members: &[&Transaction]) -> Result<Amount, EmptyGroupError> {
    let first = members.first().ok_or(EmptyGroupError)?;

    let total: f64 = members
        .iter()
        .filter(|tx| !tx.is().meta_action || tx.declined())
        .map(|tx| tx.amount())
        .filter(Amount::negative)
        .map(|amount| amount.raw())
        .sum();

    Ok(Amount::from_parts(
        SimpleAmount::new(total, first.amount().currency()),
        None,
    ))
}

// ============================================================================
// TESTS
// ============================================================================
