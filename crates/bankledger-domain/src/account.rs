//! Bank accounts: identity, metadata and the append-only transaction log.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::transaction::{Transaction, TransactionKind};

/// A single bank account.
///
/// The balance always equals the running sum of the log (deposits added,
/// withdrawals subtracted); [`Account::deposit`] and [`Account::withdraw`]
/// are the only operations that touch either, and each appends exactly one
/// entry together with the balance update. Metadata is fixed at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: Uuid,
    iban: String,
    bic: String,
    bank_name: String,
    owner_name: String,
    balance: Money,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl Account {
    /// Creates an account with a fresh id and a zero balance. Every
    /// metadata field must be non-blank.
    pub fn new(
        iban: impl Into<String>,
        bic: impl Into<String>,
        bank_name: impl Into<String>,
        owner_name: impl Into<String>,
    ) -> Result<Self, AccountError> {
        Ok(Self {
            id: Uuid::new_v4(),
            iban: required("iban", iban)?,
            bic: required("bic", bic)?,
            bank_name: required("bank name", bank_name)?,
            owner_name: required("owner name", owner_name)?,
            balance: Money::zero(),
            transactions: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn iban(&self) -> &str {
        &self.iban
    }

    pub fn bic(&self) -> &str {
        &self.bic
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Read-only view of the ledger, in chronological (insertion) order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Increases the balance and appends a deposit entry. The amount must
    /// be strictly positive; on failure nothing changes.
    pub fn deposit(
        &mut self,
        amount: Money,
        description: impl Into<String>,
    ) -> Result<&Transaction, AccountError> {
        ensure_positive(amount)?;
        self.balance = self.balance + amount;
        Ok(self.append(TransactionKind::Deposit, amount, description.into()))
    }

    /// Decreases the balance and appends a withdrawal entry. Fails when the
    /// amount is not strictly positive or exceeds the current balance; on
    /// failure nothing changes.
    pub fn withdraw(
        &mut self,
        amount: Money,
        description: impl Into<String>,
    ) -> Result<&Transaction, AccountError> {
        ensure_positive(amount)?;
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance = self.balance - amount;
        Ok(self.append(TransactionKind::Withdrawal, amount, description.into()))
    }

    fn append(&mut self, kind: TransactionKind, amount: Money, description: String) -> &Transaction {
        self.transactions.push(Transaction::record(kind, amount, description));
        &self.transactions[self.transactions.len() - 1]
    }
}

/// Two accounts are the same account iff their ibans match; ids are
/// process-local identity, the iban is the business identity.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.iban == other.iban
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iban.hash(state);
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {} — {} [{}]",
            self.owner_name, self.bank_name, self.iban, self.balance
        )
    }
}

fn required(field: &'static str, value: impl Into<String>) -> Result<String, AccountError> {
    let value = value.into();
    if value.trim().is_empty() {
        Err(AccountError::EmptyField(field))
    } else {
        Ok(value)
    }
}

fn ensure_positive(amount: Money) -> Result<(), AccountError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(AccountError::NonPositiveAmount(amount))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised by account construction and balance mutations.
pub enum AccountError {
    EmptyField(&'static str),
    NonPositiveAmount(Money),
    InsufficientFunds { balance: Money, requested: Money },
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::EmptyField(field) => write!(f, "{} must not be empty", field),
            AccountError::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {}", amount)
            }
            AccountError::InsufficientFunds { balance, requested } => {
                write!(
                    f,
                    "insufficient funds: balance {}, requested {}",
                    balance, requested
                )
            }
        }
    }
}

impl std::error::Error for AccountError {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn money(text: &str) -> Money {
        Money::parse(text).unwrap()
    }

    fn account() -> Account {
        Account::new("DE02120300000000202051", "BYLADEM1001", "Acme Bank", "Alice").unwrap()
    }

    #[test]
    fn new_rejects_blank_metadata() {
        assert_eq!(
            Account::new("", "BIC", "Bank", "Owner").unwrap_err(),
            AccountError::EmptyField("iban")
        );
        assert_eq!(
            Account::new("IBAN", "  ", "Bank", "Owner").unwrap_err(),
            AccountError::EmptyField("bic")
        );
        assert_eq!(
            Account::new("IBAN", "BIC", "", "Owner").unwrap_err(),
            AccountError::EmptyField("bank name")
        );
        assert_eq!(
            Account::new("IBAN", "BIC", "Bank", "").unwrap_err(),
            AccountError::EmptyField("owner name")
        );
    }

    #[test]
    fn new_account_starts_empty() {
        let account = account();
        assert_eq!(account.balance(), Money::zero());
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn deposit_updates_balance_and_log_together() {
        let mut account = account();
        let entry = account.deposit(money("100.00"), "salary").unwrap();
        assert_eq!(entry.kind, TransactionKind::Deposit);
        assert_eq!(entry.amount, money("100.00"));
        assert_eq!(entry.description, "salary");
        assert_eq!(account.balance(), money("100.00"));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn balance_tracks_the_signed_sum_of_the_log() {
        let mut account = account();
        account.deposit(money("100.00"), "a").unwrap();
        account.deposit(money("0.10"), "b").unwrap();
        account.withdraw(money("30.05"), "c").unwrap();
        account.deposit(money("12.34"), "d").unwrap();
        account.withdraw(money("0.01"), "e").unwrap();

        assert_eq!(account.balance(), money("82.38"));
        assert_eq!(account.transactions().len(), 5);
    }

    #[test]
    fn withdraw_of_exact_balance_reaches_zero() {
        let mut account = account();
        account.deposit(money("55.55"), "").unwrap();
        account.withdraw(money("55.55"), "").unwrap();
        assert_eq!(account.balance(), Money::zero());
    }

    #[test]
    fn withdraw_beyond_balance_fails_without_side_effects() {
        let mut account = account();
        account.deposit(money("10.00"), "").unwrap();

        let err = account.withdraw(money("10.01"), "too much").unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                balance: money("10.00"),
                requested: money("10.01"),
            }
        );
        assert_eq!(account.balance(), money("10.00"));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut account = account();
        account.deposit(money("5.00"), "").unwrap();

        for amount in [Money::zero(), money("-1.00")] {
            assert!(matches!(
                account.deposit(amount, ""),
                Err(AccountError::NonPositiveAmount(_))
            ));
            assert!(matches!(
                account.withdraw(amount, ""),
                Err(AccountError::NonPositiveAmount(_))
            ));
        }
        assert_eq!(account.balance(), money("5.00"));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn equality_and_hashing_use_the_iban_only() {
        let a = Account::new("X1", "BIC-A", "Bank A", "Alice").unwrap();
        let b = Account::new("X1", "BIC-B", "Bank B", "Bob").unwrap();
        let c = Account::new("X2", "BIC-A", "Bank A", "Alice").unwrap();

        assert_eq!(a, b);
        assert_ne!(a.id(), b.id());
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_label_lists_owner_bank_iban_and_balance() {
        let mut account = account();
        account.deposit(money("1.50"), "").unwrap();
        assert_eq!(
            account.to_string(),
            "Alice — Acme Bank — DE02120300000000202051 [1.50]"
        );
    }
}
