//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::Month;
use serde::Serialize;

use expense_core::Expense;

/// Width of the description column in the expense table
const DESCRIPTION_WIDTH: usize = 20;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
    /// Currency symbol printed before amounts
    currency: String,
}

impl Output {
    pub fn new(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self {
            format,
            currency: currency.into(),
        }
    }

    /// Print the expense table
    pub fn print_expenses(&self, expenses: &[Expense]) {
        match self.format {
            OutputFormat::Human => {
                if expenses.is_empty() {
                    println!("No expenses found.");
                    return;
                }
                println!(
                    "{:<5} {:<10} {:<width$} {:<10}",
                    "ID",
                    "Date",
                    "Description",
                    "Amount",
                    width = DESCRIPTION_WIDTH
                );
                for expense in expenses {
                    println!("{}", self.expense_row(expense));
                }
            }
            OutputFormat::Json => print_json(&expenses),
            OutputFormat::Quiet => {
                for expense in expenses {
                    println!("{}", expense.id);
                }
            }
        }
    }

    /// Report the ID assigned to a new expense
    pub fn print_added(&self, id: u64) {
        match self.format {
            OutputFormat::Human => println!("✓ Expense added successfully (ID: {})", id),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"status": "success", "id": id}));
            }
            OutputFormat::Quiet => println!("{}", id),
        }
    }

    /// Print a total, labelled with the month when one was selected
    pub fn print_summary(&self, total: f64, month: Option<u32>) {
        match self.format {
            OutputFormat::Human => match month.and_then(month_name) {
                Some(name) => println!(
                    "Total expenses for {}: {}",
                    name,
                    self.format_amount(total)
                ),
                None => println!("Total expenses: {}", self.format_amount(total)),
            },
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "month": month,
                        "month_name": month.and_then(month_name),
                        "total": total
                    })
                );
            }
            OutputFormat::Quiet => println!("{:.2}", total),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency, amount)
    }

    fn expense_row(&self, expense: &Expense) -> String {
        format!(
            "{:<5} {:<10} {:<width$} {}",
            expense.id,
            expense.date.format("%Y-%m-%d").to_string(),
            truncate(&expense.description, DESCRIPTION_WIDTH),
            self.format_amount(expense.amount),
            width = DESCRIPTION_WIDTH
        )
    }
}

/// English name of a month number, `None` outside 1..=12
fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format JSON output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("café crème brûlée", 8), "café ...");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(300), None);
    }

    #[test]
    fn test_format_amount_uses_currency() {
        let output = Output::new(OutputFormat::Human, "€");
        assert_eq!(output.format_amount(20.0), "€20.00");
        assert_eq!(output.format_amount(3.456), "€3.46");
    }

    #[test]
    fn test_expense_row() {
        let output = Output::new(OutputFormat::Human, "$");
        let date = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let expense = Expense::new(12, "Weekly groceries at the market", 54.3, date);

        let row = output.expense_row(&expense);
        assert_eq!(row, "12    2024-06-01 Weekly groceries ... $54.30");
    }
}
