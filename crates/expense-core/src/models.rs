//! Data models for the expense tracker
//!
//! An `Expense` is one dated entry in a ledger. Field names are the keys
//! written to the ledger file.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    /// Unique identifier within the ledger, starting at 1
    pub id: u64,
    /// When this expense was created or last updated
    pub date: DateTime<Local>,
    /// What the money was spent on
    pub description: String,
    /// Amount spent, always positive
    pub amount: f64,
}

impl Expense {
    /// Create an expense stamped with the given time
    pub fn new(id: u64, description: impl Into<String>, amount: f64, date: DateTime<Local>) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
        }
    }

    /// Replace the description and amount and restamp the date
    pub fn revise(&mut self, description: impl Into<String>, amount: f64, date: DateTime<Local>) {
        self.description = description.into();
        self.amount = amount;
        self.date = date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_expense_new() {
        let expense = Expense::new(3, "Coffee", 4.5, at(1));
        assert_eq!(expense.id, 3);
        assert_eq!(expense.description, "Coffee");
        assert_eq!(expense.amount, 4.5);
        assert_eq!(expense.date, at(1));
    }

    #[test]
    fn test_expense_revise() {
        let mut expense = Expense::new(1, "Old", 10.0, at(1));
        expense.revise("New", 15.0, at(2));
        assert_eq!(expense.id, 1);
        assert_eq!(expense.description, "New");
        assert_eq!(expense.amount, 15.0);
        assert_eq!(expense.date, at(2));
    }

    #[test]
    fn test_expense_serialization() {
        let expense = Expense::new(1, "Lunch", 20.0, at(3));
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"description\":\"Lunch\""));
        assert!(json.contains("\"amount\":20.0"));

        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, deserialized);
    }

    #[test]
    fn test_expense_deserializes_offset_timestamp() {
        let json = r#"{"id":2,"date":"2024-05-03T09:30:00.123456789+02:00","description":"Taxi","amount":12.75}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, 2);
        assert_eq!(expense.amount, 12.75);
        assert_eq!(
            expense.date.timestamp(),
            chrono::DateTime::parse_from_rfc3339("2024-05-03T09:30:00+02:00")
                .unwrap()
                .timestamp()
        );
    }
}
