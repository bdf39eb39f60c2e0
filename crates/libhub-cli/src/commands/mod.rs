pub mod books;
pub mod check;
pub mod dashboard;
pub mod fine;
pub mod loans;
pub mod login;
pub mod members;
pub mod run;
