//! Expense Tracker Core Library
//!
//! This crate provides the core functionality for the expense tracker: a
//! ledger of dated expenses kept in a single JSON file.
//!
//! # Architecture
//!
//! - **Ledger**: the in-memory, ordered collection of expenses and the
//!   operations on it (add, update, delete, summarize)
//! - **Store**: loads the whole ledger from its file and writes it back
//!
//! A command loads once, applies one operation, and saves once if the
//! ledger changed.
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::new("expenses.json");
//! let mut ledger = store.load()?;
//!
//! let id = ledger.add("Lunch", 20.0, &SystemClock)?;
//! store.save(&ledger)?;
//!
//! let total = ledger.summarize(None, &SystemClock);
//! ```
//!
//! # Modules
//!
//! - `ledger`: The expense collection and its operations
//! - `models`: The `Expense` record
//! - `store`: JSON file persistence
//! - `clock`: Injectable time source
//! - `error`: Typed ledger and storage errors
//! - `config`: Application configuration

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use models::Expense;
pub use store::Store;
