//! bankledger-config
//!
//! Persistent user preferences for the ledger store: where the snapshot
//! lives, where CSV exports go. Owns the Config data structure plus disk
//! persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
