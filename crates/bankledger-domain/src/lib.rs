//! bankledger-domain
//!
//! Pure domain models (Money, Transaction, Account). No I/O, no storage,
//! only data types and the rules that keep a single account consistent.

pub mod account;
pub mod money;
pub mod transaction;

pub use account::*;
pub use money::*;
pub use transaction::*;
