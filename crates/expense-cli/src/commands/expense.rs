//! Expense command handlers
//!
//! Each handler loads the ledger once, applies a single operation, and saves
//! only if the ledger changed.

use anyhow::{Context, Result};
use tracing::info;

use expense_core::{Clock, Store};

use crate::output::Output;

/// Record a new expense
pub fn add(
    store: &Store,
    description: String,
    amount: f64,
    clock: &dyn Clock,
    output: &Output,
) -> Result<()> {
    let mut ledger = store.load().context("Failed to load expenses")?;

    let id = ledger
        .add(description, amount, clock)
        .context("Failed to add expense")?;
    store.save(&ledger).context("Failed to save expenses")?;

    info!(id, amount, "added expense");
    output.print_added(id);
    Ok(())
}

/// Replace the description and amount of an expense
pub fn update(
    store: &Store,
    id: u64,
    description: String,
    amount: f64,
    clock: &dyn Clock,
    output: &Output,
) -> Result<()> {
    let mut ledger = store.load().context("Failed to load expenses")?;

    ledger
        .update(id, description, amount, clock)
        .context("Failed to update expense")?;
    store.save(&ledger).context("Failed to save expenses")?;

    info!(id, amount, "updated expense");
    output.success("Expense updated successfully");
    Ok(())
}

/// Delete an expense
pub fn delete(store: &Store, id: u64, output: &Output) -> Result<()> {
    let mut ledger = store.load().context("Failed to load expenses")?;

    let removed = ledger.delete(id).context("Failed to delete expense")?;
    store.save(&ledger).context("Failed to save expenses")?;

    info!(id, description = %removed.description, "deleted expense");
    output.success("Expense deleted successfully");
    Ok(())
}

/// List all expenses in insertion order
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let ledger = store.load().context("Failed to load expenses")?;
    output.print_expenses(ledger.expenses());
    Ok(())
}

/// Print the total, optionally for one month of the current year
///
/// Month 0 means no filter.
pub fn summary(store: &Store, month: Option<u32>, clock: &dyn Clock, output: &Output) -> Result<()> {
    let ledger = store.load().context("Failed to load expenses")?;

    let month = month.filter(|&m| m != 0);
    let total = ledger.summarize(month, clock);

    output.print_summary(total, month);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use chrono::{Local, TimeZone};
    use expense_core::{FixedClock, Ledger, LedgerError};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("expenses.json"));
        (temp_dir, store)
    }

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet, "$")
    }

    fn ledger_error(err: &anyhow::Error) -> Option<&LedgerError> {
        err.chain().find_map(|e| e.downcast_ref::<LedgerError>())
    }

    #[test]
    fn test_add_persists() {
        let (_dir, store) = setup();

        add(&store, "Lunch".to_string(), 20.0, &clock(), &quiet()).unwrap();
        add(&store, "Coffee".to_string(), 3.5, &clock(), &quiet()).unwrap();

        let ledger = store.load().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(1).unwrap().description, "Lunch");
        assert_eq!(ledger.get(2).unwrap().amount, 3.5);
    }

    #[test]
    fn test_update_persists() {
        let (_dir, store) = setup();
        add(&store, "Lunch".to_string(), 20.0, &clock(), &quiet()).unwrap();

        let later = FixedClock(Local.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap());
        update(&store, 1, "Team lunch".to_string(), 64.0, &later, &quiet()).unwrap();

        let ledger = store.load().unwrap();
        let expense = ledger.get(1).unwrap();
        assert_eq!(expense.description, "Team lunch");
        assert_eq!(expense.amount, 64.0);
        assert_eq!(expense.date, later.now());
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let (_dir, store) = setup();
        add(&store, "Lunch".to_string(), 20.0, &clock(), &quiet()).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = update(&store, 999, "x".to_string(), 10.0, &clock(), &quiet()).unwrap_err();
        assert!(matches!(
            ledger_error(&err),
            Some(LedgerError::NotFound { id: 999 })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_delete_persists_and_repeat_fails() {
        let (_dir, store) = setup();
        add(&store, "Lunch".to_string(), 20.0, &clock(), &quiet()).unwrap();
        add(&store, "Dinner".to_string(), 30.0, &clock(), &quiet()).unwrap();

        delete(&store, 1, &quiet()).unwrap();
        let ledger = store.load().unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(1).is_none());

        let err = delete(&store, 1, &quiet()).unwrap_err();
        assert!(matches!(
            ledger_error(&err),
            Some(LedgerError::NotFound { id: 1 })
        ));
    }

    #[test]
    fn test_read_only_commands_do_not_create_file() {
        let (_dir, store) = setup();

        list(&store, &quiet()).unwrap();
        summary(&store, None, &clock(), &quiet()).unwrap();
        summary(&store, Some(0), &clock(), &quiet()).unwrap();

        assert!(!store.exists());
    }

    #[test]
    fn test_malformed_ledger_aborts_command() {
        let (_dir, store) = setup();
        fs::write(store.path(), "not json").unwrap();

        let err = add(&store, "Lunch".to_string(), 20.0, &clock(), &quiet()).unwrap_err();
        assert!(matches!(
            ledger_error(&err),
            Some(LedgerError::MalformedStore { .. })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "not json");

        assert!(list(&store, &quiet()).is_err());
    }

    #[test]
    fn test_invalid_amount_is_rejected_by_core() {
        let (_dir, store) = setup();
        store.save(&Ledger::new()).unwrap();

        let err = add(&store, "Refund".to_string(), -4.0, &clock(), &quiet()).unwrap_err();
        assert!(matches!(
            ledger_error(&err),
            Some(LedgerError::InvalidAmount { .. })
        ));
        assert!(store.load().unwrap().is_empty());
    }
}
