//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Track personal expenses from the command line")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use this ledger file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        #[arg(long, value_parser = parse_description)]
        description: String,
        /// Amount spent (must be positive)
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Change the description and amount of an expense
    Update {
        /// Expense ID
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
        /// New description
        #[arg(long, value_parser = parse_description)]
        description: String,
        /// New amount (must be positive)
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },
    /// List all expenses
    #[command(alias = "ls")]
    List,
    /// Show total expenses, optionally for one month of the current year
    Summary {
        /// Month number (1-12); 0 or omitted means all expenses
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=12))]
        month: Option<u32>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, ledger_file, currency, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

impl Commands {
    /// Whether the command changes the ledger and must save it
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Commands::Add { .. } | Commands::Update { .. } | Commands::Delete { .. }
        )
    }
}

fn parse_description(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("description must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err("amount must be positive".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let cli = Cli::try_parse_from([
            "expense-tracker",
            "add",
            "--description",
            "Lunch",
            "--amount",
            "20",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                description,
                amount,
            } => {
                assert_eq!(description, "Lunch");
                assert_eq!(amount, 20.0);
            }
            other => panic!("Expected Add command, got {:?}", other),
        }
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let cases: &[&[&str]] = &[
            &["expense-tracker", "add", "--description", "", "--amount", "5"],
            &["expense-tracker", "add", "--description", "   ", "--amount", "5"],
            &["expense-tracker", "add", "--description", "x", "--amount", "0"],
            &["expense-tracker", "add", "--description", "x", "--amount", "-5"],
            &["expense-tracker", "add", "--description", "x", "--amount", "abc"],
            &["expense-tracker", "add", "--description", "x", "--amount", "NaN"],
            &["expense-tracker", "add", "--amount", "5"],
            &["expense-tracker", "add", "--description", "x"],
        ];

        for args in cases {
            assert!(Cli::try_parse_from(*args).is_err(), "accepted {:?}", args);
        }
    }

    #[test]
    fn test_update() {
        let cli = Cli::try_parse_from([
            "expense-tracker",
            "update",
            "--id",
            "3",
            "--description",
            "Dinner",
            "--amount",
            "42.5",
        ])
        .unwrap();

        assert!(cli.command.is_write());
        match cli.command {
            Commands::Update {
                id,
                description,
                amount,
            } => {
                assert_eq!(id, 3);
                assert_eq!(description, "Dinner");
                assert_eq!(amount, 42.5);
            }
            other => panic!("Expected Update command, got {:?}", other),
        }
    }

    #[test]
    fn test_id_must_be_positive() {
        assert!(Cli::try_parse_from(["expense-tracker", "delete", "--id", "0"]).is_err());
        assert!(Cli::try_parse_from(["expense-tracker", "delete", "--id", "-1"]).is_err());
        assert!(Cli::try_parse_from(["expense-tracker", "delete"]).is_err());
        assert!(Cli::try_parse_from([
            "expense-tracker",
            "update",
            "--description",
            "x",
            "--amount",
            "1"
        ])
        .is_err());
    }

    #[test]
    fn test_delete_alias() {
        let cli = Cli::try_parse_from(["expense-tracker", "rm", "--id", "7"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { id: 7 }));
    }

    #[test]
    fn test_list_is_read_only() {
        let cli = Cli::try_parse_from(["expense-tracker", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert!(!cli.command.is_write());
    }

    #[test]
    fn test_summary_month() {
        let cli = Cli::try_parse_from(["expense-tracker", "summary"]).unwrap();
        assert!(matches!(cli.command, Commands::Summary { month: None }));

        let cli = Cli::try_parse_from(["expense-tracker", "summary", "--month", "8"]).unwrap();
        assert!(matches!(cli.command, Commands::Summary { month: Some(8) }));
        assert!(!cli.command.is_write());

        let cli = Cli::try_parse_from(["expense-tracker", "summary", "--month", "0"]).unwrap();
        assert!(matches!(cli.command, Commands::Summary { month: Some(0) }));

        assert!(Cli::try_parse_from(["expense-tracker", "summary", "--month", "13"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "expense-tracker",
            "list",
            "--json",
            "-vv",
            "--file",
            "/tmp/ledger.json",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/ledger.json")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_set() {
        let cli =
            Cli::try_parse_from(["expense-tracker", "config", "set", "currency", "€"]).unwrap();
        match cli.command {
            Commands::Config {
                command: Some(ConfigCommands::Set { key, value }),
            } => {
                assert_eq!(key, "currency");
                assert_eq!(value, "€");
            }
            other => panic!("Expected Config Set command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_command_is_error() {
        assert!(Cli::try_parse_from(["expense-tracker"]).is_err());
    }
}
