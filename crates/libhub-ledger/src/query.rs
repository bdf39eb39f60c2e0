//! Read-only views over the ledger: search and the dashboard summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::id::IssueId;
use crate::ledger::Ledger;
use crate::member::Member;

/// Shown in place of a title when an active issue's book is gone.
pub const UNKNOWN_BOOK: &str = "Unknown Book";
/// Shown in place of a name when an active issue's member is gone.
pub const UNKNOWN_MEMBER: &str = "Unknown Member";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveLoanRow {
    pub issue_id: IssueId,
    pub book_title: String,
    pub member_name: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub overdue: bool,
    pub accrued_fine: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_books: usize,
    pub available_books: usize,
    pub total_members: usize,
    /// Sum of fines settled at return.
    pub total_fines: u64,
    /// Most urgent (earliest due) first.
    pub active_loans: Vec<ActiveLoanRow>,
}

impl Ledger {
    /// Books whose title, author or category contains `query`, ignoring case.
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        self.books()
            .filter(|book| needle.is_empty() || book.matches_lowercase(&needle))
            .collect()
    }

    /// Members whose name or email contains `query`, ignoring case.
    pub fn search_members(&self, query: &str) -> Vec<&Member> {
        let needle = query.trim().to_lowercase();
        self.members()
            .filter(|member| needle.is_empty() || member.matches_lowercase(&needle))
            .collect()
    }

    pub fn summary(&self, today: NaiveDate) -> LedgerSummary {
        let policy = self.fine_policy();

        let mut active_loans: Vec<ActiveLoanRow> = self
            .active_issues()
            .map(|issue| ActiveLoanRow {
                issue_id: issue.id.clone(),
                book_title: self
                    .book(issue.book_id.as_str())
                    .map_or_else(|| UNKNOWN_BOOK.to_string(), |book| book.title.clone()),
                member_name: self
                    .member(issue.member_id.as_str())
                    .map_or_else(|| UNKNOWN_MEMBER.to_string(), |member| member.name.clone()),
                issue_date: issue.issue_date,
                due_date: issue.due_date,
                overdue: issue.is_overdue(today),
                accrued_fine: issue.accrued_fine(&policy, today),
            })
            .collect();
        active_loans.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.issue_id.cmp(&b.issue_id))
        });

        LedgerSummary {
            total_books: self.books().count(),
            available_books: self.books().filter(|book| book.available).count(),
            total_members: self.members().count(),
            total_fines: self
                .issues()
                .fold(0u64, |total, issue| total.saturating_add(issue.fine)),
            active_loans,
        }
    }
}
