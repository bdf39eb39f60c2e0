use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "libhub",
    about = "libhub: browse the library catalogue and run lending transactions",
    version
)]
pub struct Cli {
    /// Path to a TOML config (loan period, fine rate, credentials)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log ledger activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List or search the book catalogue
    Books {
        /// Case-insensitive match on title, author or category
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List or search members
    Members {
        /// Case-insensitive match on name or email
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List loan records
    Loans {
        /// Only this member's borrowing history
        #[arg(long)]
        member: Option<String>,

        /// Only loans not yet returned
        #[arg(long)]
        active: bool,

        /// Evaluate overdue status as of this date (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Totals and active loans, most urgent first
    Dashboard {
        /// Evaluate overdue status as of this date (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the overdue fine for a due date
    Fine {
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,

        /// Return date; omit for a loan still out
        #[arg(long)]
        returned: Option<NaiveDate>,

        /// Date an unreturned loan is measured against (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a JSONL command script to the ledger
    Run {
        /// Path to the script (one command per line)
        script: String,

        /// Start from an empty ledger instead of the demo dataset
        #[arg(long)]
        empty: bool,

        /// Date for commands that carry none (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify ledger invariants on the demo dataset
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check administrator credentials
    Login {
        #[arg(long, default_value = "")]
        username: String,

        #[arg(long, default_value = "")]
        password: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
