//! Double-entry records in memory.
//!
//! Accounts, postings and transactions; a zero-sum check; running balances
//! (accumulator and fold forms); ledger-text rendering and flat JSON balance
//! snapshots. Pure domain logic only: no IO, no persistence.

pub mod account;
pub mod balance;
pub mod config;
pub mod format;
pub mod posting;
pub mod snapshot;
pub mod transaction;

pub use account::Account;
pub use balance::{reduce_balance, Apply, BalanceMap};
pub use config::LedgerStyle;
pub use format::{render_journal, render_journal_with, validate_account_name};
pub use posting::Posting;
pub use transaction::Transaction;

pub use ledgerkit_core::{Annotations, Decimal, DomainError, DomainResult};
