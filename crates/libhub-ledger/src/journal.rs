//! Append-only journal of ledger mutations.
//!
//! One event per successful operation; rejected operations leave no trace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{BookId, IssueId, MemberId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LedgerAction {
    BookIssued {
        issue_id: IssueId,
        book_id: BookId,
        member_id: MemberId,
        due_date: NaiveDate,
    },
    BookReturned {
        issue_id: IssueId,
        book_id: BookId,
        fine: u64,
    },
    BookAdded {
        book_id: BookId,
    },
    BookUpdated {
        book_id: BookId,
    },
    BookDeleted {
        book_id: BookId,
    },
    MemberAdded {
        member_id: MemberId,
    },
    MemberUpdated {
        member_id: MemberId,
    },
    MemberDeleted {
        member_id: MemberId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEvent {
    /// 1-based, gap-free within one ledger lifetime.
    pub sequence: u64,
    /// Business date of the operation, for operations that take one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub action: LedgerAction,
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Vec<LedgerEvent>,
}

impl Journal {
    pub(crate) fn record(&mut self, date: Option<NaiveDate>, action: LedgerAction) {
        let sequence = u64::try_from(self.events.len()).map_or(u64::MAX, |len| len + 1);
        self.events.push(LedgerEvent {
            sequence,
            date,
            action,
        });
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&LedgerEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
