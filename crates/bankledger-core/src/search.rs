//! Query descriptions for account and transaction searches.

use chrono::{DateTime, Utc};

use bankledger_domain::{Money, Transaction, TransactionKind};

/// Criteria for the multi-attribute account search.
///
/// Blank or absent fields impose no constraint. Iban and bic match
/// exactly; owner and bank are case-insensitive substring matches against
/// the indexed names.
#[derive(Debug, Clone, Default)]
pub struct AccountQuery {
    pub iban: Option<String>,
    pub bic: Option<String>,
    pub owner: Option<String>,
    pub bank: Option<String>,
}

impl AccountQuery {
    /// Whether any criterion is supplied and non-blank.
    pub fn is_constrained(&self) -> bool {
        [&self.iban, &self.bic, &self.owner, &self.bank]
            .iter()
            .any(|field| non_blank(field).is_some())
    }
}

/// Criteria applied to one account's transaction log. All supplied
/// criteria must hold at once.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub min: Option<Money>,
    pub max: Option<Money>,
    pub description: Option<String>,
}

impl TransactionFilter {
    /// Whether `transaction` passes every supplied criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(from) = self.from {
            if transaction.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if transaction.timestamp > to {
                return false;
            }
        }
        if let Some(min) = self.min {
            if transaction.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if transaction.amount > max {
                return false;
            }
        }
        if let Some(needle) = non_blank(&self.description) {
            let needle = needle.to_lowercase();
            if !transaction.description.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Trims an optional criterion, treating blank strings as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
