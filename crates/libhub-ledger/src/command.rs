//! JSONL command scripts: one ledger mutation per line.
//!
//! ```text
//! {"op":"issue_book","bookId":"b1","memberId":"m1","date":"2024-01-01"}
//! {"op":"return_book","bookId":"b1","date":"2024-01-20"}
//! ```
//!
//! Commands without a `date` run against the caller's "today".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::book::{Book, BookDraft};
use crate::error::{EntityKind, LedgerError};
use crate::id::{BookId, IssueId, MemberId};
use crate::issue::Issue;
use crate::ledger::Ledger;
use crate::member::{Member, MemberDraft};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LedgerCommand {
    IssueBook {
        book_id: BookId,
        member_id: MemberId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<NaiveDate>,
    },
    /// Return by issue id, or by the book currently on loan.
    ReturnBook {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issue_id: Option<IssueId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        book_id: Option<BookId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<NaiveDate>,
    },
    AddBook {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<BookId>,
        book: BookDraft,
    },
    UpdateBook {
        book_id: BookId,
        book: BookDraft,
    },
    DeleteBook {
        book_id: BookId,
    },
    AddMember {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<MemberId>,
        member: MemberDraft,
    },
    UpdateMember {
        member_id: MemberId,
        member: MemberDraft,
    },
    DeleteMember {
        member_id: MemberId,
    },
}

impl LedgerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::IssueBook { .. } => "issue_book",
            Self::ReturnBook { .. } => "return_book",
            Self::AddBook { .. } => "add_book",
            Self::UpdateBook { .. } => "update_book",
            Self::DeleteBook { .. } => "delete_book",
            Self::AddMember { .. } => "add_member",
            Self::UpdateMember { .. } => "update_member",
            Self::DeleteMember { .. } => "delete_member",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    Issued { issue: Issue },
    Returned { issue: Issue },
    BookSaved { book: Book },
    BookDeleted { book: Book },
    MemberSaved { member: Member },
    MemberDeleted { member: Member },
}

impl Ledger {
    /// Run one command. `today` applies when the command carries no date.
    pub fn apply(
        &mut self,
        command: LedgerCommand,
        today: NaiveDate,
    ) -> Result<CommandOutcome, LedgerError> {
        match command {
            LedgerCommand::IssueBook {
                book_id,
                member_id,
                date,
            } => self
                .issue_book(&book_id, &member_id, date.unwrap_or(today))
                .map(|issue| CommandOutcome::Issued { issue }),
            LedgerCommand::ReturnBook {
                issue_id,
                book_id,
                date,
            } => {
                let issue_id = match (issue_id, book_id) {
                    (Some(issue_id), _) => issue_id,
                    (None, Some(book_id)) => self
                        .active_issue_for_book(book_id.as_str())
                        .map(|issue| issue.id.clone())
                        .ok_or_else(|| LedgerError::NotFound {
                            entity: EntityKind::Issue,
                            id: format!("active issue for book {book_id}"),
                        })?,
                    (None, None) => return Err(LedgerError::MissingSelection(EntityKind::Issue)),
                };
                self.return_book(&issue_id, date.unwrap_or(today))
                    .map(|issue| CommandOutcome::Returned { issue })
            }
            LedgerCommand::AddBook { id, book } => {
                let saved = match id {
                    Some(id) => self.add_book_with_id(id, book),
                    None => self.add_book(book),
                };
                saved.map(|book| CommandOutcome::BookSaved { book })
            }
            LedgerCommand::UpdateBook { book_id, book } => self
                .update_book(&book_id, book)
                .map(|book| CommandOutcome::BookSaved { book }),
            LedgerCommand::DeleteBook { book_id } => self
                .delete_book(&book_id)
                .map(|book| CommandOutcome::BookDeleted { book }),
            LedgerCommand::AddMember { id, member } => {
                let saved = match id {
                    Some(id) => self.add_member_with_id(id, member),
                    None => self.add_member(member),
                };
                saved.map(|member| CommandOutcome::MemberSaved { member })
            }
            LedgerCommand::UpdateMember { member_id, member } => self
                .update_member(&member_id, member)
                .map(|member| CommandOutcome::MemberSaved { member }),
            LedgerCommand::DeleteMember { member_id } => self
                .delete_member(&member_id)
                .map(|member| CommandOutcome::MemberDeleted { member }),
        }
    }
}

/// A parsed command and the 1-based script line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub line: usize,
    pub command: LedgerCommand,
}

/// Read commands from a JSONL reader.
pub fn read_script(reader: impl BufRead) -> Result<Vec<ScriptEntry>, CommandError> {
    let mut entries = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CommandError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command: LedgerCommand = serde_json::from_str(trimmed)
            .map_err(|e| CommandError::Parse(line_no + 1, e.to_string()))?;
        entries.push(ScriptEntry {
            line: line_no + 1,
            command,
        });
    }
    Ok(entries)
}

/// Read commands from a JSONL file path.
pub fn read_script_from_path(path: impl AsRef<Path>) -> Result<Vec<ScriptEntry>, CommandError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| CommandError::Io(0, format!("{}: {e}", path.display())))?;
    read_script(BufReader::new(bytes.as_slice()))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("IO error at line {0}: {1}")]
    Io(usize, String),

    #[error("parse error at line {0}: {1}")]
    Parse(usize, String),
}
