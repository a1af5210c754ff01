//! In-memory expense ledger
//!
//! The `Ledger` is the ordered collection of expenses loaded from one file.
//! Operations validate their input before touching the collection, so a
//! failed call leaves it unchanged.
//!
//! ```text
//! let mut ledger = Ledger::new();
//! let id = ledger.add("Lunch", 20.0, &SystemClock)?;
//! ledger.update(id, "Team lunch", 42.0, &SystemClock)?;
//! let total = ledger.summarize(None, &SystemClock);
//! ```

use std::collections::HashSet;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Ordered collection of expenses, serialized as a plain JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// All expenses in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Get an expense by ID
    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// The ID the next added expense will receive
    ///
    /// One past the highest ID present, or 1 for an empty ledger.
    pub fn next_id(&self) -> LedgerResult<u64> {
        let max = self.expenses.iter().map(|e| e.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(LedgerError::IdsExhausted { max })
    }

    /// Check the invariants a loaded file must satisfy
    ///
    /// IDs are positive and distinct, amounts positive and finite.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.expenses.len());
        for expense in &self.expenses {
            if expense.id == 0 {
                return Err("expense ID 0 is not allowed".to_string());
            }
            if !seen.insert(expense.id) {
                return Err(format!("duplicate expense ID {}", expense.id));
            }
            if validate_amount(expense.amount).is_err() {
                return Err(format!(
                    "expense {} has non-positive amount {}",
                    expense.id, expense.amount
                ));
            }
        }
        Ok(())
    }

    /// Append a new expense stamped with the clock's current time
    ///
    /// Returns the assigned ID.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        amount: f64,
        clock: &dyn Clock,
    ) -> LedgerResult<u64> {
        validate_amount(amount)?;

        let id = self.next_id()?;
        self.expenses
            .push(Expense::new(id, description, amount, clock.now()));
        Ok(id)
    }

    /// Replace the description and amount of an existing expense
    ///
    /// The date is reset to the clock's current time, so it records when the
    /// entry was last touched rather than when it was created.
    pub fn update(
        &mut self,
        id: u64,
        description: impl Into<String>,
        amount: f64,
        clock: &dyn Clock,
    ) -> LedgerResult<()> {
        validate_amount(amount)?;

        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::NotFound { id })?;
        expense.revise(description, amount, clock.now());
        Ok(())
    }

    /// Remove an expense, keeping the rest in order
    ///
    /// Returns the removed expense.
    pub fn delete(&mut self, id: u64) -> LedgerResult<Expense> {
        let pos = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::NotFound { id })?;
        Ok(self.expenses.remove(pos))
    }

    /// Total amount spent
    ///
    /// With `month` set, only expenses dated in that month of the clock's
    /// current year count. Entries from the same month of earlier years are
    /// excluded. A month outside 1..=12 matches nothing.
    pub fn summarize(&self, month: Option<u32>, clock: &dyn Clock) -> f64 {
        match month {
            None => self.expenses.iter().map(|e| e.amount).sum(),
            Some(month) => {
                let year = clock.now().year();
                self.expenses
                    .iter()
                    .filter(|e| e.date.year() == year && e.date.month() == month)
                    .map(|e| e.amount)
                    .sum()
            }
        }
    }
}

impl From<Vec<Expense>> for Ledger {
    fn from(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }
}

/// Reject zero, negative and non-finite amounts
fn validate_amount(amount: f64) -> LedgerResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount { amount })
    }
}
