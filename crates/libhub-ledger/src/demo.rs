//! The bundled demo dataset: six books, four members, two loans.
//!
//! The CLI starts every invocation from this ledger unless told otherwise.

use chrono::NaiveDate;

use crate::book::Book;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::issue::Issue;
use crate::ledger::Ledger;
use crate::member::Member;

struct DemoBook {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    category: &'static str,
    isbn: &'static str,
    published_year: i32,
    cover_image: &'static str,
}

const BOOKS: &[DemoBook] = &[
    DemoBook {
        id: "b1",
        title: "Clean Code",
        author: "Robert C. Martin",
        category: "Programming",
        isbn: "9780132350884",
        published_year: 2008,
        cover_image: "https://m.media-amazon.com/images/I/41xShlnTZTL._SX218_BO1,204,203,200_QL40_FMwebp_.jpg",
    },
    DemoBook {
        id: "b2",
        title: "Design Patterns",
        author: "Erich Gamma, Richard Helm, Ralph Johnson, John Vlissides",
        category: "Programming",
        isbn: "9780201633610",
        published_year: 1994,
        cover_image: "https://m.media-amazon.com/images/I/51szD9HC9pL._SX395_BO1,204,203,200_.jpg",
    },
    DemoBook {
        id: "b3",
        title: "The Pragmatic Programmer",
        author: "Andrew Hunt, David Thomas",
        category: "Programming",
        isbn: "9780201616224",
        published_year: 1999,
        cover_image: "https://m.media-amazon.com/images/I/51W1sBPO7tL._SX380_BO1,204,203,200_.jpg",
    },
    DemoBook {
        id: "b4",
        title: "Introduction to Algorithms",
        author: "Thomas H. Cormen, Charles E. Leiserson, Ronald L. Rivest, Clifford Stein",
        category: "Computer Science",
        isbn: "9780262033848",
        published_year: 2009,
        cover_image: "https://m.media-amazon.com/images/I/41T0iBxY8FL._SX440_BO1,204,203,200_.jpg",
    },
    DemoBook {
        id: "b5",
        title: "Artificial Intelligence: A Modern Approach",
        author: "Stuart Russell, Peter Norvig",
        category: "Computer Science",
        isbn: "9780136042594",
        published_year: 2009,
        cover_image: "https://m.media-amazon.com/images/I/51qJuR1CJeL._SX440_BO1,204,203,200_.jpg",
    },
    DemoBook {
        id: "b6",
        title: "Database System Concepts",
        author: "Abraham Silberschatz, Henry F. Korth, S. Sudarshan",
        category: "Database",
        isbn: "9780073523323",
        published_year: 2010,
        cover_image: "https://m.media-amazon.com/images/I/51cF9JHRzxL._SX402_BO1,204,203,200_.jpg",
    },
];

// (id, name, email, phone, join date)
const MEMBERS: &[(&str, &str, &str, &str, (i32, u32, u32))] = &[
    ("m1", "Ahmed Ali", "ahmed.ali@university.edu", "+966 50 123 4567", (2022, 9, 1)),
    ("m2", "Fatima Mohammed", "fatima.m@university.edu", "+966 55 987 6543", (2021, 10, 15)),
    ("m3", "Omar Ibrahim", "omar.i@university.edu", "+966 54 567 8901", (2023, 1, 10)),
    ("m4", "Sara Abdullah", "sara.a@university.edu", "+966 56 234 5678", (2022, 8, 22)),
];

// (id, book, member, issued, due)
const ISSUES: &[(&str, &str, &str, (i32, u32, u32), (i32, u32, u32))] = &[
    ("i1", "b2", "m1", (2023, 9, 10), (2023, 9, 24)),
    ("i2", "b6", "m2", (2023, 9, 5), (2023, 9, 19)),
];

fn ymd((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, LedgerError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        LedgerError::invalid("date", format!("{year:04}-{month:02}-{day:02} is not a date"))
    })
}

impl Ledger {
    /// A ledger seeded with the demo dataset.
    pub fn demo(config: LedgerConfig) -> Result<Self, LedgerError> {
        let books = BOOKS
            .iter()
            .map(|book| Book {
                id: book.id.into(),
                title: book.title.to_string(),
                author: book.author.to_string(),
                category: book.category.to_string(),
                isbn: book.isbn.to_string(),
                published_year: book.published_year,
                available: true,
                cover_image: book.cover_image.to_string(),
            })
            .collect();

        let members = MEMBERS
            .iter()
            .map(|&(id, name, email, phone, joined)| {
                Ok(Member {
                    id: id.into(),
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    join_date: ymd(joined)?,
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        let issues = ISSUES
            .iter()
            .map(|&(id, book_id, member_id, issued, due)| {
                Ok(Issue {
                    id: id.into(),
                    book_id: book_id.into(),
                    member_id: member_id.into(),
                    issue_date: ymd(issued)?,
                    due_date: ymd(due)?,
                    return_date: None,
                    returned: false,
                    fine: 0,
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        Self::from_records(config, books, members, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_dataset_lends_two_books() {
        let ledger = Ledger::demo(LedgerConfig::default()).expect("demo should load");
        assert_eq!(ledger.books().count(), 6);
        assert_eq!(ledger.members().count(), 4);

        let on_loan: Vec<&str> = ledger
            .books()
            .filter(|book| !book.available)
            .map(|book| book.id.as_str())
            .collect();
        assert_eq!(on_loan, vec!["b2", "b6"]);
        assert_eq!(ledger.member_issues("m1").len(), 1);
        assert_eq!(ledger.member_issues("m2").len(), 1);
        assert!(ledger.member_issues("m3").is_empty());
    }

    #[test]
    fn demo_dataset_is_consistent() {
        let ledger = Ledger::demo(LedgerConfig::default()).expect("demo should load");
        let report = ledger.check_consistency();
        assert!(report.accepted(), "{:?}", report.findings);
        assert!(ledger.journal().is_empty());
    }

    #[test]
    fn demo_drafts_pass_validation() {
        let ledger = Ledger::demo(LedgerConfig::default()).expect("demo should load");
        for book in ledger.books() {
            crate::book::BookDraft::from(book)
                .validate()
                .expect("demo book should validate");
        }
        for member in ledger.members() {
            crate::member::MemberDraft::from(member)
                .validate()
                .expect("demo member should validate");
        }
    }
}
