//! Issue type: one loan of one book to one member.
//!
//! Lifecycle is two-state: active (`returned = false`) then returned, which is
//! terminal. An issue is never re-opened or deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fine::FinePolicy;
use crate::id::{BookId, IssueId, MemberId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Set exactly once, when the book comes back.
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub returned: bool,
    /// Finalized at return; zero while active.
    #[serde(default)]
    pub fine: u64,
}

impl Issue {
    pub(crate) fn open(
        id: IssueId,
        book_id: BookId,
        member_id: MemberId,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            book_id,
            member_id,
            issue_date,
            due_date,
            return_date: None,
            returned: false,
            fine: 0,
        }
    }

    pub(crate) fn close(&mut self, returned_on: NaiveDate, fine: u64) {
        self.return_date = Some(returned_on);
        self.returned = true;
        self.fine = fine;
    }

    pub fn is_active(&self) -> bool {
        !self.returned
    }

    /// Still out and past its due date as of `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && today > self.due_date
    }

    /// The settled fine once returned, otherwise what the loan would owe if it
    /// came back `today`.
    pub fn accrued_fine(&self, policy: &FinePolicy, today: NaiveDate) -> u64 {
        if self.returned {
            self.fine
        } else {
            policy.calculate(self.due_date, None, today)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("fixture date should parse")
    }

    fn active() -> Issue {
        Issue::open(
            IssueId::from("i2"),
            BookId::from("b6"),
            MemberId::from("m2"),
            date("2023-09-05"),
            date("2023-09-19"),
        )
    }

    #[test]
    fn open_issue_has_no_return_state() {
        let issue = active();
        assert!(issue.is_active());
        assert_eq!(issue.return_date, None);
        assert_eq!(issue.fine, 0);
    }

    #[test]
    fn overdue_only_after_due_date() {
        let issue = active();
        assert!(!issue.is_overdue(date("2023-09-19")));
        assert!(issue.is_overdue(date("2023-09-20")));
    }

    #[test]
    fn accrued_fine_tracks_today_until_closed() {
        let policy = FinePolicy::default();
        let mut issue = active();
        assert_eq!(issue.accrued_fine(&policy, date("2023-09-22")), 15);

        issue.close(date("2023-09-20"), 5);
        assert!(!issue.is_overdue(date("2023-12-01")));
        assert_eq!(issue.accrued_fine(&policy, date("2023-12-01")), 5);
    }

    #[test]
    fn seed_json_without_return_fields_parses_as_active() {
        let issue: Issue = serde_json::from_str(
            r#"{"id":"i1","bookId":"b2","memberId":"m1","issueDate":"2023-09-10","dueDate":"2023-09-24"}"#,
        )
        .expect("issue should parse");
        assert!(issue.is_active());
        assert_eq!(issue.return_date, None);
    }
}
