//! Canonical in-memory lending ledger.
//!
//! The ledger owns books, members and issues and is the only thing that
//! mutates them. Every operation validates all of its preconditions before
//! touching any collection, so a failed call leaves the ledger exactly as it
//! was and a successful issue/return updates book, member view and issue
//! record together.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::book::{Book, BookDraft};
use crate::config::LedgerConfig;
use crate::error::{EntityKind, LedgerError};
use crate::fine::FinePolicy;
use crate::id::{BookId, IssueId, MemberId};
use crate::issue::Issue;
use crate::journal::{Journal, LedgerAction};
use crate::member::{Member, MemberDraft};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    config: LedgerConfig,
    books: BTreeMap<BookId, Book>,
    members: BTreeMap<MemberId, Member>,
    /// Issues in creation order. Never removed.
    issues: Vec<Issue>,
    issue_positions: BTreeMap<IssueId, usize>,
    /// Each member's borrowing history, oldest first.
    member_loans: BTreeMap<MemberId, Vec<IssueId>>,
    journal: Journal,
}

impl Ledger {
    /// An empty ledger.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a ledger from fully-materialized records.
    ///
    /// Book availability is re-derived from the active issues, whatever the
    /// incoming `available` flags say. Returned issues may reference books or
    /// members that no longer exist; active ones may not.
    pub fn from_records(
        config: LedgerConfig,
        books: Vec<Book>,
        members: Vec<Member>,
        issues: Vec<Issue>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(config);

        for mut book in books {
            if ledger.books.contains_key(&book.id) {
                return Err(LedgerError::DuplicateId {
                    entity: EntityKind::Book,
                    id: book.id.to_string(),
                });
            }
            book.available = true;
            ledger.books.insert(book.id.clone(), book);
        }

        for member in members {
            if ledger.members.contains_key(&member.id) {
                return Err(LedgerError::DuplicateId {
                    entity: EntityKind::Member,
                    id: member.id.to_string(),
                });
            }
            ledger.members.insert(member.id.clone(), member);
        }

        let mut active_by_book: BTreeMap<BookId, IssueId> = BTreeMap::new();
        for issue in issues {
            if ledger.issue_positions.contains_key(&issue.id) {
                return Err(LedgerError::DuplicateId {
                    entity: EntityKind::Issue,
                    id: issue.id.to_string(),
                });
            }
            if issue.returned != issue.return_date.is_some() {
                return Err(LedgerError::invalid(
                    "returnDate",
                    format!("issue {} must have a return date exactly when returned", issue.id),
                ));
            }
            if issue.is_active() {
                if issue.fine != 0 {
                    return Err(LedgerError::invalid(
                        "fine",
                        format!("active issue {} cannot carry a fine", issue.id),
                    ));
                }
                let Some(book) = ledger.books.get_mut(&issue.book_id) else {
                    return Err(LedgerError::unknown(EntityKind::Book, &issue.book_id));
                };
                if !ledger.members.contains_key(&issue.member_id) {
                    return Err(LedgerError::unknown(EntityKind::Member, &issue.member_id));
                }
                if let Some(first) = active_by_book.get(&issue.book_id) {
                    return Err(LedgerError::ConflictingLoans {
                        book_id: issue.book_id.clone(),
                        first: first.clone(),
                        second: issue.id.clone(),
                    });
                }
                book.available = false;
                active_by_book.insert(issue.book_id.clone(), issue.id.clone());
            }
            ledger.push_issue(issue);
        }

        debug!(
            books = ledger.books.len(),
            members = ledger.members.len(),
            issues = ledger.issues.len(),
            "ledger hydrated from records"
        );
        Ok(ledger)
    }

    /// Drop every record and journal entry, keeping the configuration.
    pub fn reset(&mut self) {
        self.books.clear();
        self.members.clear();
        self.issues.clear();
        self.issue_positions.clear();
        self.member_loans.clear();
        self.journal.clear();
        debug!("ledger reset");
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn fine_policy(&self) -> FinePolicy {
        self.config.fine_policy()
    }

    /// Fine for the given dates under this ledger's rate.
    pub fn calculate_fine(
        &self,
        due: NaiveDate,
        returned: Option<NaiveDate>,
        today: NaiveDate,
    ) -> u64 {
        self.fine_policy().calculate(due, returned, today)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    // ── Lookups ──

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issue_positions
            .get(id)
            .and_then(|&position| self.issues.get(position))
    }

    /// Books in id order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Members in id order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Issues in creation order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn active_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_active())
    }

    /// A member's borrowing history, oldest first.
    ///
    /// These are the ledger's own issue records, not copies.
    pub fn member_issues(&self, member_id: &str) -> Vec<&Issue> {
        self.member_loans
            .get(member_id)
            .into_iter()
            .flatten()
            .filter_map(|issue_id| self.issue(issue_id.as_str()))
            .collect()
    }

    /// The active issue lending `book_id`, if any.
    pub fn active_issue_for_book(&self, book_id: &str) -> Option<&Issue> {
        self.active_issues()
            .find(|issue| issue.book_id.as_str() == book_id)
    }

    pub(crate) fn member_index(&self) -> &BTreeMap<MemberId, Vec<IssueId>> {
        &self.member_loans
    }

    // ── Lending ──

    /// Lend `book_id` to `member_id`, due one loan period after `today`.
    pub fn issue_book(
        &mut self,
        book_id: &BookId,
        member_id: &MemberId,
        today: NaiveDate,
    ) -> Result<Issue, LedgerError> {
        if book_id.is_blank() {
            return Err(LedgerError::MissingSelection(EntityKind::Book));
        }
        if member_id.is_blank() {
            return Err(LedgerError::MissingSelection(EntityKind::Member));
        }
        let Some(book) = self.books.get(book_id) else {
            warn!(%book_id, "issue rejected: unknown book");
            return Err(LedgerError::unknown(EntityKind::Book, book_id));
        };
        if !self.members.contains_key(member_id) {
            warn!(%member_id, "issue rejected: unknown member");
            return Err(LedgerError::unknown(EntityKind::Member, member_id));
        }
        if !book.available {
            warn!(%book_id, "issue rejected: book already on loan");
            return Err(LedgerError::BookUnavailable(book_id.clone()));
        }
        let due_date = today
            .checked_add_days(self.config.loan_period())
            .ok_or_else(|| LedgerError::invalid("issueDate", format!("{today} is out of range")))?;

        let issue_id = self.fresh_issue_id();
        let issue = Issue::open(
            issue_id.clone(),
            book_id.clone(),
            member_id.clone(),
            today,
            due_date,
        );

        if let Some(book) = self.books.get_mut(book_id) {
            book.available = false;
        }
        self.push_issue(issue.clone());
        self.journal.record(
            Some(today),
            LedgerAction::BookIssued {
                issue_id: issue_id.clone(),
                book_id: book_id.clone(),
                member_id: member_id.clone(),
                due_date,
            },
        );
        debug!(%issue_id, %book_id, %member_id, %due_date, "book issued");
        Ok(issue)
    }

    /// Close an active issue on `today`, finalizing its fine.
    pub fn return_book(&mut self, issue_id: &IssueId, today: NaiveDate) -> Result<Issue, LedgerError> {
        let policy = self.fine_policy();
        let Some(issue) = self
            .issue_positions
            .get(issue_id)
            .copied()
            .and_then(|position| self.issues.get_mut(position))
        else {
            warn!(%issue_id, "return rejected: unknown issue");
            return Err(LedgerError::not_found(EntityKind::Issue, issue_id));
        };
        if issue.returned {
            warn!(%issue_id, "return rejected: already returned");
            return Err(LedgerError::AlreadyReturned(issue_id.clone()));
        }

        let fine = policy.calculate(issue.due_date, Some(today), today);
        issue.close(today, fine);
        let returned = issue.clone();

        if let Some(book) = self.books.get_mut(&returned.book_id) {
            book.available = true;
        }
        self.journal.record(
            Some(today),
            LedgerAction::BookReturned {
                issue_id: issue_id.clone(),
                book_id: returned.book_id.clone(),
                fine,
            },
        );
        debug!(%issue_id, book_id = %returned.book_id, fine, "book returned");
        Ok(returned)
    }

    // ── Books ──

    /// Catalogue a new, available book under a freshly minted id.
    pub fn add_book(&mut self, draft: BookDraft) -> Result<Book, LedgerError> {
        let id = self.fresh_book_id();
        self.add_book_with_id(id, draft)
    }

    /// Catalogue a new, available book under a caller-chosen id.
    pub fn add_book_with_id(&mut self, id: BookId, draft: BookDraft) -> Result<Book, LedgerError> {
        if id.is_blank() {
            return Err(LedgerError::MissingSelection(EntityKind::Book));
        }
        if self.books.contains_key(&id) {
            return Err(LedgerError::DuplicateId {
                entity: EntityKind::Book,
                id: id.to_string(),
            });
        }
        draft.validate()?;

        let book = draft.into_book(id.clone(), true);
        self.books.insert(id.clone(), book.clone());
        self.journal
            .record(None, LedgerAction::BookAdded { book_id: id.clone() });
        debug!(book_id = %id, title = %book.title, "book added");
        Ok(book)
    }

    /// Replace a book's editable fields. Availability is preserved.
    pub fn update_book(&mut self, id: &BookId, draft: BookDraft) -> Result<Book, LedgerError> {
        let Some(existing) = self.books.get(id) else {
            return Err(LedgerError::not_found(EntityKind::Book, id));
        };
        draft.validate()?;

        let book = draft.into_book(id.clone(), existing.available);
        self.books.insert(id.clone(), book.clone());
        self.journal
            .record(None, LedgerAction::BookUpdated { book_id: id.clone() });
        debug!(book_id = %id, "book updated");
        Ok(book)
    }

    /// Remove a book from the catalogue. Books on loan cannot be removed.
    pub fn delete_book(&mut self, id: &BookId) -> Result<Book, LedgerError> {
        let Some(existing) = self.books.get(id) else {
            return Err(LedgerError::not_found(EntityKind::Book, id));
        };
        if !existing.available {
            warn!(book_id = %id, "delete rejected: book on loan");
            return Err(LedgerError::BookOnLoan(id.clone()));
        }

        let removed = self
            .books
            .remove(id)
            .ok_or_else(|| LedgerError::not_found(EntityKind::Book, id))?;
        self.journal
            .record(None, LedgerAction::BookDeleted { book_id: id.clone() });
        debug!(book_id = %id, "book deleted");
        Ok(removed)
    }

    // ── Members ──

    /// Register a new member under a freshly minted id.
    pub fn add_member(&mut self, draft: MemberDraft) -> Result<Member, LedgerError> {
        let id = self.fresh_member_id();
        self.add_member_with_id(id, draft)
    }

    /// Register a new member under a caller-chosen id.
    pub fn add_member_with_id(
        &mut self,
        id: MemberId,
        draft: MemberDraft,
    ) -> Result<Member, LedgerError> {
        if id.is_blank() {
            return Err(LedgerError::MissingSelection(EntityKind::Member));
        }
        if self.member_id_in_use(&id) {
            warn!(member_id = %id, "add rejected: member id already referenced");
            return Err(LedgerError::DuplicateId {
                entity: EntityKind::Member,
                id: id.to_string(),
            });
        }
        draft.validate()?;

        let member = draft.into_member(id.clone());
        self.members.insert(id.clone(), member.clone());
        self.journal.record(
            None,
            LedgerAction::MemberAdded {
                member_id: id.clone(),
            },
        );
        debug!(member_id = %id, "member added");
        Ok(member)
    }

    /// Replace a member's editable fields. Borrowing history is untouched.
    pub fn update_member(
        &mut self,
        id: &MemberId,
        draft: MemberDraft,
    ) -> Result<Member, LedgerError> {
        if !self.members.contains_key(id) {
            return Err(LedgerError::not_found(EntityKind::Member, id));
        }
        draft.validate()?;

        let member = draft.into_member(id.clone());
        self.members.insert(id.clone(), member.clone());
        self.journal.record(
            None,
            LedgerAction::MemberUpdated {
                member_id: id.clone(),
            },
        );
        debug!(member_id = %id, "member updated");
        Ok(member)
    }

    /// Remove a member. Members with unreturned books cannot be removed.
    ///
    /// Their returned issues stay in the ledger.
    pub fn delete_member(&mut self, id: &MemberId) -> Result<Member, LedgerError> {
        if !self.members.contains_key(id) {
            return Err(LedgerError::not_found(EntityKind::Member, id));
        }
        if self
            .member_issues(id.as_str())
            .iter()
            .any(|issue| issue.is_active())
        {
            warn!(member_id = %id, "delete rejected: member has unreturned books");
            return Err(LedgerError::MemberHasActiveLoans(id.clone()));
        }

        let removed = self
            .members
            .remove(id)
            .ok_or_else(|| LedgerError::not_found(EntityKind::Member, id))?;
        self.member_loans.remove(id);
        self.journal.record(
            None,
            LedgerAction::MemberDeleted {
                member_id: id.clone(),
            },
        );
        debug!(member_id = %id, "member deleted");
        Ok(removed)
    }

    // ── Internals ──

    fn push_issue(&mut self, issue: Issue) {
        if self.members.contains_key(&issue.member_id) {
            self.member_loans
                .entry(issue.member_id.clone())
                .or_default()
                .push(issue.id.clone());
        }
        self.issue_positions
            .insert(issue.id.clone(), self.issues.len());
        self.issues.push(issue);
    }

    fn fresh_book_id(&self) -> BookId {
        loop {
            let id = BookId::generate();
            if !self.books.contains_key(&id) {
                return id;
            }
        }
    }

    /// A member id stays taken while any issue, even a returned one, names
    /// it. Otherwise a new member would inherit someone else's history.
    fn member_id_in_use(&self, id: &MemberId) -> bool {
        self.members.contains_key(id) || self.issues.iter().any(|issue| issue.member_id == *id)
    }

    fn fresh_member_id(&self) -> MemberId {
        loop {
            let id = MemberId::generate();
            if !self.member_id_in_use(&id) {
                return id;
            }
        }
    }

    fn fresh_issue_id(&self) -> IssueId {
        loop {
            let id = IssueId::generate();
            if !self.issue_positions.contains_key(&id) {
                return id;
            }
        }
    }
}
