//! # libhub-ledger
//!
//! The lending ledger for a small library.
//!
//! This crate provides:
//! - `Book`, `Member` and `Issue` records (an `Issue` is one loan)
//! - `Ledger`: the owned in-memory state and every mutation on it
//! - the overdue-fine formula (`FinePolicy`, `calculate_fine`)
//! - search and dashboard queries, a consistency checker and a mutation journal
//! - JSONL command scripts for driving the ledger in batch
//!
//! It intentionally does not render anything, persist anything, or check real
//! credentials. Those concerns belong to callers (see `libhub-cli`).
//!
//! ## Data model
//!
//! ```text
//! books   : BookId   -> Book      (available = no active issue)
//! members : MemberId -> Member
//! issues  : [Issue]  (stored once, append-only)
//!     ^
//!     |  member index: MemberId -> [IssueId]
//! ```

pub mod auth;
pub mod book;
pub mod command;
pub mod config;
pub mod consistency;
pub mod demo;
pub mod error;
pub mod fine;
pub mod id;
pub mod issue;
pub mod journal;
pub mod ledger;
pub mod member;
pub mod query;

pub use auth::{AuthError, Authenticator, Credentials, Session, StaticAuthenticator};
pub use book::{Book, BookDraft};
pub use command::{
    CommandError, CommandOutcome, LedgerCommand, ScriptEntry, read_script, read_script_from_path,
};
pub use config::{AuthConfig, ConfigError, LedgerConfig};
pub use consistency::{
    CONSISTENCY_CHECK_KIND, ConsistencyFinding, ConsistencyReport, ConsistencySummary,
    FINDING_AVAILABILITY_MISMATCH, FINDING_FINE_BEFORE_RETURN, FINDING_MEMBER_INDEX_DRIFT,
    FINDING_MULTIPLE_ACTIVE_ISSUES, FINDING_RETURN_STATE, FINDING_UNKNOWN_BOOK,
    FINDING_UNKNOWN_MEMBER,
};
pub use error::{EntityKind, ErrorClass, LedgerError};
pub use fine::{
    DEFAULT_FINE_PER_DAY, DEFAULT_LOAN_PERIOD_DAYS, FinePolicy, calculate_fine, overdue_days,
    overdue_days_between,
};
pub use id::{BookId, IssueId, MemberId};
pub use issue::Issue;
pub use journal::{Journal, LedgerAction, LedgerEvent};
pub use ledger::Ledger;
pub use member::{Member, MemberDraft};
pub use query::{ActiveLoanRow, LedgerSummary, UNKNOWN_BOOK, UNKNOWN_MEMBER};
