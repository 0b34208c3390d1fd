//! bankledger-storage-json
//!
//! Filesystem-backed JSON persistence for the account store, plus CSV
//! export of a single account's ledger. The snapshot file holds the plain
//! account list; secondary indexes are rebuilt on load.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use bankledger_core::{AccountStore, CoreError, StoreStorage};
use bankledger_domain::Account;

const TMP_SUFFIX: &str = "tmp";
const CSV_HEADER: [&str; 7] = [
    "timestamp",
    "type",
    "amount",
    "description",
    "iban",
    "owner",
    "bank",
];
const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialized form of the whole store.
#[derive(Debug, Serialize, Deserialize)]
struct StoreSnapshot {
    accounts: Vec<Account>,
}

/// Filesystem-backed JSON persistence for account stores.
#[derive(Debug, Clone)]
pub struct JsonStoreStorage {
    store_path: PathBuf,
}

impl JsonStoreStorage {
    pub fn new(store_path: PathBuf) -> Self {
        Self { store_path }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl StoreStorage for JsonStoreStorage {
    fn save(&self, store: &AccountStore) -> Result<(), CoreError> {
        let snapshot = StoreSnapshot {
            accounts: store.snapshot_accounts(),
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        // stage into a sibling tmp file and rename over the target, so a
        // failed write never clobbers the previous snapshot
        let tmp = tmp_path(&self.store_path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.store_path)?;
        debug!(
            path = %self.store_path.display(),
            accounts = store.len(),
            "store saved"
        );
        Ok(())
    }

    fn load_or_create_empty(&self) -> Result<AccountStore, CoreError> {
        if !self.store_path.exists() {
            return Ok(AccountStore::new());
        }
        let data = match fs::read_to_string(&self.store_path) {
            Ok(data) => data,
            Err(err) => {
                warn!(
                    path = %self.store_path.display(),
                    %err,
                    "unreadable store snapshot, starting empty"
                );
                return Ok(AccountStore::new());
            }
        };
        match serde_json::from_str::<StoreSnapshot>(&data) {
            Ok(snapshot) => {
                debug!(
                    path = %self.store_path.display(),
                    accounts = snapshot.accounts.len(),
                    "store loaded"
                );
                Ok(AccountStore::from_accounts(snapshot.accounts))
            }
            Err(err) => {
                warn!(
                    path = %self.store_path.display(),
                    %err,
                    "corrupt store snapshot, starting empty"
                );
                Ok(AccountStore::new())
            }
        }
    }

    fn export_transactions_csv(
        &self,
        store: &AccountStore,
        account_id: Uuid,
        path: &Path,
    ) -> Result<(), CoreError> {
        let account = store
            .get(account_id)
            .ok_or(CoreError::AccountNotFound(account_id))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // descriptions are sanitized below, so no field ever contains the
        // delimiter and quoting can stay off
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .quote_style(csv::QuoteStyle::Never)
            .from_path(path)
            .map_err(csv_error)?;
        writer.write_record(CSV_HEADER).map_err(csv_error)?;
        for transaction in account.transactions() {
            writer
                .write_record([
                    transaction
                        .timestamp
                        .format(CSV_TIMESTAMP_FORMAT)
                        .to_string(),
                    transaction.kind.to_string(),
                    transaction.amount.to_string(),
                    sanitize_description(&transaction.description),
                    account.iban().to_string(),
                    account.owner_name().to_string(),
                    account.bank_name().to_string(),
                ])
                .map_err(csv_error)?;
        }
        writer.flush()?;
        debug!(
            path = %path.display(),
            account = %account_id,
            rows = account.transactions().len(),
            "ledger exported"
        );
        Ok(())
    }
}

/// The record separator must not occur inside a field; semicolons in
/// descriptions fold to commas instead of being quoted.
fn sanitize_description(description: &str) -> String {
    description.replace(';', ",")
}

fn csv_error(err: csv::Error) -> CoreError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CoreError::Io(io),
            _ => CoreError::Storage("csv write failed".into()),
        }
    } else {
        CoreError::Storage(err.to_string())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
