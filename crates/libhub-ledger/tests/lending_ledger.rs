//! Integration tests: lending properties of the public ledger API.
//!
//! Every scenario re-runs the consistency checker after each operation, so
//! availability, the member index and the issue records are verified to
//! agree at every step, not just at the end.

use chrono::NaiveDate;
use libhub_ledger::{
    BookDraft, BookId, ErrorClass, Issue, Ledger, LedgerAction, LedgerConfig, LedgerError,
    MemberDraft, MemberId, calculate_fine,
};

fn date(s: &str) -> NaiveDate {
    s.parse()
        .unwrap_or_else(|e| panic!("bad fixture date {s}: {e}"))
}

fn assert_consistent(ledger: &Ledger, step: &str) {
    let report = ledger.check_consistency();
    assert!(
        report.accepted(),
        "ledger inconsistent after {step}:\n{}",
        serde_json::to_string_pretty(&report.findings).expect("findings serialize"),
    );
}

fn demo() -> Ledger {
    let ledger = Ledger::demo(LedgerConfig::default()).expect("demo ledger should load");
    assert_consistent(&ledger, "demo load");
    ledger
}

fn book_id(id: &str) -> BookId {
    BookId::from(id)
}

fn member_id(id: &str) -> MemberId {
    MemberId::from(id)
}

fn snapshot(ledger: &Ledger) -> (Vec<libhub_ledger::Book>, Vec<libhub_ledger::Member>, Vec<Issue>) {
    (
        ledger.books().cloned().collect(),
        ledger.members().cloned().collect(),
        ledger.issues().cloned().collect(),
    )
}

#[test]
fn issue_then_return_settles_fine_and_restores_availability() {
    let mut ledger = demo();

    let issue = ledger
        .issue_book(&book_id("b1"), &member_id("m1"), date("2024-01-01"))
        .expect("b1 should be lendable");
    assert_consistent(&ledger, "issue");
    assert_eq!(issue.due_date, date("2024-01-15"));
    assert!(!ledger.book("b1").expect("b1").available);

    let returned = ledger
        .return_book(&issue.id, date("2024-01-20"))
        .expect("return should succeed");
    assert_consistent(&ledger, "return");
    assert_eq!(returned.fine, 25);
    assert_eq!(returned.return_date, Some(date("2024-01-20")));
    assert!(ledger.book("b1").expect("b1").available);

    let history = ledger.member_issues("m1");
    let view = history
        .iter()
        .find(|candidate| candidate.id == issue.id)
        .expect("member history should list the issue");
    assert_eq!(*view, ledger.issue(issue.id.as_str()).expect("global record"));
    assert_eq!(**view, returned);
}

#[test]
fn lending_an_unavailable_book_changes_nothing() {
    let mut ledger = demo();
    let before = snapshot(&ledger);
    let journal_before = ledger.journal().len();

    let err = ledger
        .issue_book(&book_id("b2"), &member_id("m3"), date("2023-09-12"))
        .expect_err("b2 is already on loan");
    assert_eq!(err, LedgerError::BookUnavailable(book_id("b2")));
    assert_eq!(err.class(), ErrorClass::Validation);

    assert_eq!(snapshot(&ledger), before);
    assert_eq!(ledger.journal().len(), journal_before);
    assert_consistent(&ledger, "rejected issue");
}

#[test]
fn second_return_fails_without_recomputing_fine() {
    let mut ledger = demo();
    let first = ledger
        .return_book(&"i2".into(), date("2023-09-24"))
        .expect("i2 should return");
    assert_eq!(first.fine, 25);

    let err = ledger
        .return_book(&"i2".into(), date("2023-12-31"))
        .expect_err("second return must fail");
    assert_eq!(err.class(), ErrorClass::NotFound);
    assert!(matches!(err, LedgerError::AlreadyReturned(_)));
    assert_eq!(ledger.issue("i2").expect("i2").fine, 25);
    assert_consistent(&ledger, "double return");
}

#[test]
fn fine_formula_matches_reference_dates() {
    let due = date("2023-09-19");
    assert_eq!(calculate_fine(due, Some(date("2023-09-24")), date("2023-09-30")), 25);
    assert_eq!(calculate_fine(due, None, date("2023-09-19")), 0);
    assert_eq!(calculate_fine(due, Some(date("2023-09-19")), date("2023-10-30")), 0);
}

#[test]
fn member_with_unreturned_book_cannot_be_deleted() {
    let mut ledger = demo();

    let err = ledger
        .delete_member(&member_id("m1"))
        .expect_err("m1 still holds b2");
    assert_eq!(err.class(), ErrorClass::Validation);
    assert_eq!(err.to_string(), "member m1 has unreturned books");
    assert!(ledger.member("m1").is_some());

    ledger
        .return_book(&"i1".into(), date("2023-09-20"))
        .expect("i1 should return");
    let removed = ledger
        .delete_member(&member_id("m1"))
        .expect("m1 has only returned issues");
    assert_eq!(removed.name, "Ahmed Ali");
    assert!(ledger.issue("i1").is_some(), "history outlives the member");
    assert_consistent(&ledger, "member delete");
}

#[test]
fn deleted_member_id_is_not_handed_to_a_new_member() {
    let mut ledger = demo();

    let issue = ledger
        .issue_book(&book_id("b1"), &member_id("m3"), date("2024-01-01"))
        .expect("b1 should lend to m3");
    assert_consistent(&ledger, "issue to m3");
    ledger
        .return_book(&issue.id, date("2024-01-10"))
        .expect("return should succeed");
    assert_consistent(&ledger, "return from m3");
    ledger
        .delete_member(&member_id("m3"))
        .expect("m3 has only returned issues");
    assert_consistent(&ledger, "delete m3");

    let newcomer = MemberDraft {
        name: "Layla Hassan".to_string(),
        email: "layla.h@university.edu".to_string(),
        phone: "+966 53 111 2222".to_string(),
        join_date: date("2024-02-01"),
    };
    let err = ledger
        .add_member_with_id(member_id("m3"), newcomer.clone())
        .expect_err("m3 still names a returned issue");
    assert_eq!(err.class(), ErrorClass::Validation);
    assert_eq!(err.to_string(), "duplicate member id: m3");
    assert!(ledger.member("m3").is_none());
    assert_eq!(ledger.issue(issue.id.as_str()).expect("history kept").member_id, member_id("m3"));
    assert_consistent(&ledger, "rejected re-add");

    let member = ledger.add_member(newcomer).expect("fresh id should add");
    assert_ne!(member.id, member_id("m3"));
    assert!(ledger.member_issues(member.id.as_str()).is_empty());
    assert_consistent(&ledger, "add under fresh id");
}

#[test]
fn updating_a_member_keeps_their_borrowing_history() {
    let mut ledger = demo();
    let before: Vec<Issue> = ledger
        .member_issues("m1")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].id.as_str(), "i1");

    let mut edit = MemberDraft::from(ledger.member("m1").expect("m1"));
    edit.name = "Ahmed A. Ali".to_string();
    edit.phone = "+966 50 000 0000".to_string();
    let updated = ledger
        .update_member(&member_id("m1"), edit)
        .expect("update should succeed");
    assert_eq!(updated.name, "Ahmed A. Ali");
    assert_consistent(&ledger, "member update");

    let after: Vec<Issue> = ledger
        .member_issues("m1")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(after, before);
    assert!(!ledger.book("b2").expect("b2").available);
}

#[test]
fn deleting_unknown_records_is_not_found() {
    let mut ledger = demo();
    assert_eq!(
        ledger
            .delete_member(&member_id("m99"))
            .expect_err("m99 does not exist")
            .class(),
        ErrorClass::NotFound
    );
    assert_eq!(
        ledger
            .delete_book(&book_id("b99"))
            .expect_err("b99 does not exist")
            .class(),
        ErrorClass::NotFound
    );
}

#[test]
fn crud_round_trip_keeps_the_ledger_consistent() {
    let mut ledger = demo();

    let book = ledger
        .add_book(BookDraft {
            title: "Refactoring".to_string(),
            author: "Martin Fowler".to_string(),
            category: "Programming".to_string(),
            isbn: "9780134757599".to_string(),
            published_year: 2018,
            cover_image: String::new(),
        })
        .expect("book should add");
    assert!(book.available);
    assert!(book.id.as_str().starts_with("b-"));
    assert_consistent(&ledger, "add book");

    let member = ledger
        .add_member(MemberDraft {
            name: "Layla Hassan".to_string(),
            email: "layla.h@university.edu".to_string(),
            phone: "+966 53 111 2222".to_string(),
            join_date: date("2024-02-01"),
        })
        .expect("member should add");
    assert_consistent(&ledger, "add member");

    let issue = ledger
        .issue_book(&book.id, &member.id, date("2024-02-02"))
        .expect("new book should lend");
    assert_consistent(&ledger, "issue new book");

    let mut edit = BookDraft::from(&book);
    edit.title = "Refactoring (2nd ed.)".to_string();
    let edited = ledger.update_book(&book.id, edit).expect("edit should succeed");
    assert!(!edited.available, "editing must not free a lent book");
    assert_consistent(&ledger, "edit lent book");

    let err = ledger.delete_book(&book.id).expect_err("lent book stays");
    assert_eq!(err, LedgerError::BookOnLoan(book.id.clone()));

    ledger
        .return_book(&issue.id, date("2024-02-10"))
        .expect("return should succeed");
    ledger.delete_book(&book.id).expect("returned book can go");
    ledger.delete_member(&member.id).expect("member can go");
    assert_consistent(&ledger, "cleanup");

    let actions: Vec<&str> = ledger
        .journal()
        .events()
        .iter()
        .map(|event| match &event.action {
            LedgerAction::BookIssued { .. } => "issued",
            LedgerAction::BookReturned { .. } => "returned",
            LedgerAction::BookAdded { .. } => "book+",
            LedgerAction::BookUpdated { .. } => "book~",
            LedgerAction::BookDeleted { .. } => "book-",
            LedgerAction::MemberAdded { .. } => "member+",
            LedgerAction::MemberUpdated { .. } => "member~",
            LedgerAction::MemberDeleted { .. } => "member-",
        })
        .collect();
    assert_eq!(
        actions,
        vec!["book+", "member+", "issued", "book~", "returned", "book-", "member-"]
    );
}

#[test]
fn reset_starts_over() {
    let mut ledger = demo();
    ledger.reset();
    assert_eq!(ledger.books().count(), 0);
    assert_eq!(ledger.issues().count(), 0);
    assert_consistent(&ledger, "reset");
}
