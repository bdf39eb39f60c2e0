//! Deterministic ledger consistency checking.
//!
//! The ledger maintains these invariants itself; the checker exists so tests
//! and operators can confirm that after the fact.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::id::{BookId, IssueId};
use crate::ledger::Ledger;

pub const CONSISTENCY_CHECK_KIND: &str = "libhub.ledger.consistency.v1";

pub const FINDING_AVAILABILITY_MISMATCH: &str = "ledger.book.availability_mismatch";
pub const FINDING_MULTIPLE_ACTIVE_ISSUES: &str = "ledger.book.multiple_active_issues";
pub const FINDING_UNKNOWN_BOOK: &str = "ledger.issue.unknown_book";
pub const FINDING_UNKNOWN_MEMBER: &str = "ledger.issue.unknown_member";
pub const FINDING_RETURN_STATE: &str = "ledger.issue.return_state";
pub const FINDING_FINE_BEFORE_RETURN: &str = "ledger.issue.fine_before_return";
pub const FINDING_MEMBER_INDEX_DRIFT: &str = "ledger.member.index_drift";

const RESULT_ACCEPTED: &str = "accepted";
const RESULT_REJECTED: &str = "rejected";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyFinding {
    pub subject_id: String,
    pub class: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySummary {
    pub book_count: usize,
    pub member_count: usize,
    pub issue_count: usize,
    pub active_issue_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub check_kind: String,
    pub result: String,
    pub finding_classes: Vec<String>,
    pub findings: Vec<ConsistencyFinding>,
    pub summary: ConsistencySummary,
}

impl ConsistencyReport {
    pub fn accepted(&self) -> bool {
        self.result == RESULT_ACCEPTED
    }

    fn from_findings(findings: Vec<ConsistencyFinding>, summary: ConsistencySummary) -> Self {
        let finding_classes = findings
            .iter()
            .map(|finding| finding.class.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let result = if findings.is_empty() {
            RESULT_ACCEPTED
        } else {
            RESULT_REJECTED
        };
        Self {
            check_kind: CONSISTENCY_CHECK_KIND.to_string(),
            result: result.to_string(),
            finding_classes,
            findings,
            summary,
        }
    }
}

fn finding(subject_id: impl ToString, class: &str, message: String) -> ConsistencyFinding {
    ConsistencyFinding {
        subject_id: subject_id.to_string(),
        class: class.to_string(),
        message,
    }
}

impl Ledger {
    /// Re-verify every ledger invariant and report each violation.
    pub fn check_consistency(&self) -> ConsistencyReport {
        let mut findings = Vec::new();
        let mut active_by_book: BTreeMap<&BookId, Vec<&IssueId>> = BTreeMap::new();

        for issue in self.issues() {
            if issue.returned != issue.return_date.is_some() {
                findings.push(finding(
                    &issue.id,
                    FINDING_RETURN_STATE,
                    format!(
                        "returned={} but return date is {}",
                        issue.returned,
                        issue
                            .return_date
                            .map_or_else(|| "absent".to_string(), |date| date.to_string())
                    ),
                ));
            }
            if !issue.is_active() {
                continue;
            }
            if issue.fine != 0 {
                findings.push(finding(
                    &issue.id,
                    FINDING_FINE_BEFORE_RETURN,
                    format!("active issue carries a fine of {}", issue.fine),
                ));
            }
            if self.book(issue.book_id.as_str()).is_none() {
                findings.push(finding(
                    &issue.id,
                    FINDING_UNKNOWN_BOOK,
                    format!("active issue references unknown book {}", issue.book_id),
                ));
            }
            if self.member(issue.member_id.as_str()).is_none() {
                findings.push(finding(
                    &issue.id,
                    FINDING_UNKNOWN_MEMBER,
                    format!("active issue references unknown member {}", issue.member_id),
                ));
            }
            active_by_book
                .entry(&issue.book_id)
                .or_default()
                .push(&issue.id);
        }

        for (book_id, issue_ids) in &active_by_book {
            if issue_ids.len() > 1 {
                let listed: Vec<&str> = issue_ids.iter().map(|id| id.as_str()).collect();
                findings.push(finding(
                    book_id,
                    FINDING_MULTIPLE_ACTIVE_ISSUES,
                    format!("book has {} active issues: {}", issue_ids.len(), listed.join(", ")),
                ));
            }
        }

        for book in self.books() {
            let on_loan = active_by_book.contains_key(&book.id);
            if book.available == on_loan {
                findings.push(finding(
                    &book.id,
                    FINDING_AVAILABILITY_MISMATCH,
                    format!(
                        "available={} but {} active issue",
                        book.available,
                        if on_loan { "has an" } else { "has no" }
                    ),
                ));
            }
        }

        let index = self.member_index();
        for (member_id, issue_ids) in index {
            if self.member(member_id.as_str()).is_none() {
                findings.push(finding(
                    member_id,
                    FINDING_MEMBER_INDEX_DRIFT,
                    "borrowing index kept for a deleted member".to_string(),
                ));
            }
            for issue_id in issue_ids {
                match self.issue(issue_id.as_str()) {
                    Some(issue) if issue.member_id == *member_id => {}
                    Some(issue) => findings.push(finding(
                        member_id,
                        FINDING_MEMBER_INDEX_DRIFT,
                        format!("indexed issue {issue_id} belongs to {}", issue.member_id),
                    )),
                    None => findings.push(finding(
                        member_id,
                        FINDING_MEMBER_INDEX_DRIFT,
                        format!("indexed issue {issue_id} does not exist"),
                    )),
                }
            }
        }
        for issue in self.issues() {
            if self.member(issue.member_id.as_str()).is_none() {
                continue;
            }
            let occurrences = index
                .get(&issue.member_id)
                .map_or(0, |ids| ids.iter().filter(|id| **id == issue.id).count());
            if occurrences != 1 {
                findings.push(finding(
                    &issue.member_id,
                    FINDING_MEMBER_INDEX_DRIFT,
                    format!("issue {} appears {occurrences} times in the borrowing index", issue.id),
                ));
            }
        }

        let summary = ConsistencySummary {
            book_count: self.books().count(),
            member_count: self.members().count(),
            issue_count: self.issues().count(),
            active_issue_count: self.active_issues().count(),
        };
        ConsistencyReport::from_findings(findings, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;
    use crate::config::LedgerConfig;
    use crate::issue::Issue;
    use crate::member::Member;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("fixture date should parse")
    }

    fn book(id: &str) -> Book {
        Book {
            id: id.into(),
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            category: "Programming".to_string(),
            isbn: "9780132350884".to_string(),
            published_year: 2008,
            available: true,
            cover_image: String::new(),
        }
    }

    fn member(id: &str) -> Member {
        Member {
            id: id.into(),
            name: "Omar Ibrahim".to_string(),
            email: "omar.i@university.edu".to_string(),
            phone: "+966 54 567 8901".to_string(),
            join_date: date("2023-01-10"),
        }
    }

    #[test]
    fn fresh_and_mutated_ledgers_are_accepted() {
        let mut ledger = Ledger::from_records(
            LedgerConfig::default(),
            vec![book("b1")],
            vec![member("m3")],
            vec![],
        )
        .expect("records should hydrate");
        assert!(ledger.check_consistency().accepted());

        let issue = ledger
            .issue_book(&"b1".into(), &"m3".into(), date("2024-05-01"))
            .expect("issue should succeed");
        let report = ledger.check_consistency();
        assert!(report.accepted(), "{:?}", report.findings);
        assert_eq!(report.summary.active_issue_count, 1);

        ledger
            .return_book(&issue.id, date("2024-05-30"))
            .expect("return should succeed");
        assert!(ledger.check_consistency().accepted());
    }

    #[test]
    fn returned_history_of_deleted_records_is_accepted() {
        let mut returned = Issue {
            id: "i1".into(),
            book_id: "b-gone".into(),
            member_id: "m-gone".into(),
            issue_date: date("2023-01-01"),
            due_date: date("2023-01-15"),
            return_date: None,
            returned: false,
            fine: 0,
        };
        returned.return_date = Some(date("2023-01-20"));
        returned.returned = true;
        returned.fine = 25;

        let ledger = Ledger::from_records(LedgerConfig::default(), vec![], vec![], vec![returned])
            .expect("history should hydrate");
        let report = ledger.check_consistency();
        assert!(report.accepted(), "{:?}", report.findings);
        assert_eq!(report.check_kind, CONSISTENCY_CHECK_KIND);
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let ledger = Ledger::new(LedgerConfig::default());
        let json = serde_json::to_value(ledger.check_consistency()).expect("report serializes");
        assert_eq!(json["result"], "accepted");
        assert_eq!(json["summary"]["activeIssueCount"], 0);
        assert!(json["findingClasses"].as_array().is_some_and(Vec::is_empty));
    }

    #[test]
    fn rejected_report_collects_sorted_unique_classes() {
        let report = ConsistencyReport::from_findings(
            vec![
                finding("b1", FINDING_AVAILABILITY_MISMATCH, "x".to_string()),
                finding("i1", FINDING_RETURN_STATE, "y".to_string()),
                finding("b2", FINDING_AVAILABILITY_MISMATCH, "z".to_string()),
            ],
            ConsistencySummary {
                book_count: 2,
                member_count: 0,
                issue_count: 1,
                active_issue_count: 0,
            },
        );
        assert!(!report.accepted());
        assert_eq!(
            report.finding_classes,
            vec![
                FINDING_AVAILABILITY_MISMATCH.to_string(),
                FINDING_RETURN_STATE.to_string()
            ]
        );
    }
}
