//! Member records and the editable draft used to create or update them.
//!
//! A member's borrowing history is not stored on the record; the ledger keeps
//! an index from member to issue ids (see `Ledger::member_issues`).

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{LedgerError, require_text};
use crate::id::MemberId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub join_date: NaiveDate,
}

impl Member {
    /// Case-insensitive match of an already-lowercased needle against name
    /// and email.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub join_date: NaiveDate,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex must compile")
    })
}

impl MemberDraft {
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("phone", &self.phone)?;
        if !email_re().is_match(self.email.trim()) {
            return Err(LedgerError::invalid(
                "email",
                format!("`{}` is not an email address", self.email),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_member(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            join_date: self.join_date,
        }
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            join_date: member.join_date,
        }
    }
}
