//! The account store: primary map plus derived secondary indexes.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use bankledger_domain::{Account, Money, Transaction};

use crate::error::CoreError;
use crate::search::{non_blank, AccountQuery, TransactionFilter};

/// Owns every account together with the lookup indexes derived from them.
///
/// Indexes are built when an account is added and never reconciled
/// afterwards; account metadata is immutable post-construction, so they
/// stay valid for the lifetime of the store. Owner and bank names are
/// lower-cased at insertion to support case-insensitive search.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<Uuid, Account>,
    by_iban: HashMap<String, Uuid>,
    by_bic: HashMap<String, HashSet<Uuid>>,
    by_owner: HashMap<String, HashSet<Uuid>>,
    by_bank: HashMap<String, HashSet<Uuid>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store, indexes included, from a plain account list.
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        let mut store = Self::new();
        for account in accounts {
            store.add(account);
        }
        store
    }

    /// Inserts an account into the primary map and every secondary index.
    ///
    /// When the iban is already indexed, the new account takes over the
    /// iban entry; the earlier account stays reachable by id and through
    /// the bic/owner/bank indexes. [`crate::store_warnings`] reports such
    /// shadowed accounts.
    pub fn add(&mut self, account: Account) -> Uuid {
        let id = account.id();
        self.by_iban.insert(account.iban().to_string(), id);
        self.by_bic
            .entry(account.bic().to_string())
            .or_default()
            .insert(id);
        self.by_owner
            .entry(account.owner_name().to_lowercase())
            .or_default()
            .insert(id);
        self.by_bank
            .entry(account.bank_name().to_lowercase())
            .or_default()
            .insert(id);
        self.accounts.insert(id, account);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn get_by_iban(&self, iban: &str) -> Option<&Account> {
        self.by_iban.get(iban).and_then(|id| self.accounts.get(id))
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    /// Records a deposit against the account identified by `id`.
    pub fn deposit(
        &mut self,
        id: Uuid,
        amount: Money,
        description: impl Into<String>,
    ) -> Result<(), CoreError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(CoreError::AccountNotFound(id))?;
        account.deposit(amount, description)?;
        Ok(())
    }

    /// Records a withdrawal against the account identified by `id`.
    pub fn withdraw(
        &mut self,
        id: Uuid,
        amount: Money,
        description: impl Into<String>,
    ) -> Result<(), CoreError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(CoreError::AccountNotFound(id))?;
        account.withdraw(amount, description)?;
        Ok(())
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts ordered by iban, for deterministic serialization.
    pub fn snapshot_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.iban().cmp(b.iban()));
        accounts
    }

    /// Narrowing-intersection search over the secondary indexes.
    ///
    /// Criteria are applied in a fixed order (iban, bic, owner, bank); the
    /// first supplied criterion seeds the candidate set and each further
    /// one intersects with it, so any empty match set empties the result.
    /// With no criteria at all, every account is returned. Result order is
    /// unspecified.
    pub fn search_accounts(&self, query: &AccountQuery) -> Vec<&Account> {
        let mut candidates: Option<HashSet<Uuid>> = None;

        if let Some(iban) = non_blank(&query.iban) {
            let hits = self.by_iban.get(iban).copied().into_iter().collect();
            candidates = Some(hits);
        }
        if let Some(bic) = non_blank(&query.bic) {
            let hits = self.by_bic.get(bic).cloned().unwrap_or_default();
            candidates = Some(intersect(candidates, hits));
        }
        if let Some(owner) = non_blank(&query.owner) {
            let hits = substring_hits(&self.by_owner, &owner.to_lowercase());
            candidates = Some(intersect(candidates, hits));
        }
        if let Some(bank) = non_blank(&query.bank) {
            let hits = substring_hits(&self.by_bank, &bank.to_lowercase());
            candidates = Some(intersect(candidates, hits));
        }

        match candidates {
            None => self.accounts.values().collect(),
            Some(ids) => ids
                .into_iter()
                .filter_map(|id| self.accounts.get(&id))
                .collect(),
        }
    }

    /// Scans one account's log in chronological order, keeping the entries
    /// that pass `filter`. An unknown account id yields an empty result,
    /// not an error.
    pub fn search_transactions(&self, id: Uuid, filter: &TransactionFilter) -> Vec<&Transaction> {
        match self.accounts.get(&id) {
            Some(account) => account
                .transactions()
                .iter()
                .filter(|transaction| filter.matches(transaction))
                .collect(),
            None => Vec::new(),
        }
    }
}

fn intersect(current: Option<HashSet<Uuid>>, next: HashSet<Uuid>) -> HashSet<Uuid> {
    match current {
        None => next,
        Some(current) => current.intersection(&next).copied().collect(),
    }
}

fn substring_hits(index: &HashMap<String, HashSet<Uuid>>, needle: &str) -> HashSet<Uuid> {
    index
        .iter()
        .filter(|(key, _)| key.contains(needle))
        .flat_map(|(_, ids)| ids.iter().copied())
        .collect()
}
