//! Immutable ledger entries recorded against an account.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Direction of a balance change. The amount itself is always positive;
/// the kind carries the sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        };
        f.write_str(label)
    }
}

/// One balance-affecting event in an account's ledger.
///
/// Entries are appended by [`crate::Account::deposit`] and
/// [`crate::Account::withdraw`] and never mutated or removed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub timestamp: DateTime<Utc>,
    pub amount: Money,
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub(crate) fn record(kind: TransactionKind, amount: Money, description: String) -> Self {
        Self {
            timestamp: Utc::now(),
            amount,
            kind,
            description,
        }
    }
}
