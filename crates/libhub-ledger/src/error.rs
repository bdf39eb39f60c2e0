//! Error types for ledger operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{BookId, IssueId, MemberId};

/// The record kinds a ledger error can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Book,
    Member,
    Issue,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Member => "member",
            Self::Issue => "issue",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error taxonomy surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// A precondition was violated; the caller can correct the input.
    Validation,
    /// An identifier did not resolve to a record the operation can act on.
    NotFound,
}

/// Errors raised by ledger operations.
///
/// Every error leaves the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A required identifier was empty.
    #[error("no {0} selected")]
    MissingSelection(EntityKind),

    /// An identifier passed as an operation input does not resolve.
    #[error("unknown {entity}: {id}")]
    UnknownReference { entity: EntityKind, id: String },

    /// The record an operation targets does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("book {0} is not available")]
    BookUnavailable(BookId),

    #[error("book {0} is on loan and cannot be deleted")]
    BookOnLoan(BookId),

    #[error("member {0} has unreturned books")]
    MemberHasActiveLoans(MemberId),

    #[error("issue {0} has already been returned")]
    AlreadyReturned(IssueId),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("duplicate {entity} id: {id}")]
    DuplicateId { entity: EntityKind, id: String },

    #[error("book {book_id} has more than one active issue: {first} and {second}")]
    ConflictingLoans {
        book_id: BookId,
        first: IssueId,
        second: IssueId,
    },
}

impl LedgerError {
    /// Map onto the two-class taxonomy callers present to users.
    ///
    /// Returning an already-returned issue is a `NotFound`: there is no active
    /// issue with that id.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } | Self::AlreadyReturned(_) => ErrorClass::NotFound,
            Self::MissingSelection(_)
            | Self::UnknownReference { .. }
            | Self::BookUnavailable(_)
            | Self::BookOnLoan(_)
            | Self::MemberHasActiveLoans(_)
            | Self::InvalidField { .. }
            | Self::DuplicateId { .. }
            | Self::ConflictingLoans { .. } => ErrorClass::Validation,
        }
    }

    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn unknown(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::UnknownReference {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject empty or whitespace-only required text.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::invalid(field, "is required"));
    }
    Ok(())
}
