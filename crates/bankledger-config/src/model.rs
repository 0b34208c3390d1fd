use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the ledger store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom location of the store snapshot. Defaults to
    /// `<data dir>/bankledger/store.json`.
    pub store_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for CSV exports. Defaults to
    /// `~/Documents/bankledger`.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            store_file: None,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "EUR".into()
    }

    /// Path of the persisted store snapshot.
    pub fn resolve_store_file(&self) -> PathBuf {
        if let Some(path) = &self.store_file {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("bankledger").join("store.json")
    }

    /// Directory CSV exports are written to.
    pub fn resolve_export_dir(&self) -> PathBuf {
        if let Some(path) = &self.export_dir {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("bankledger")
    }
}
