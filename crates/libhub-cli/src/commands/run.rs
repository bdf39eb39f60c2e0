use crate::support::{demo_ledger_or_exit, print_json, today_or_default};
use chrono::NaiveDate;
use libhub_ledger::{CommandOutcome, Ledger, LedgerConfig, read_script_from_path};
use serde_json::json;

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Issued { issue } => format!(
            "issued {} to {} as {} (due {})",
            issue.book_id, issue.member_id, issue.id, issue.due_date
        ),
        CommandOutcome::Returned { issue } => {
            format!("returned {} ({}), fine {}", issue.id, issue.book_id, issue.fine)
        }
        CommandOutcome::BookSaved { book } => format!("saved book {} {}", book.id, book.title),
        CommandOutcome::BookDeleted { book } => format!("deleted book {}", book.id),
        CommandOutcome::MemberSaved { member } => {
            format!("saved member {} {}", member.id, member.name)
        }
        CommandOutcome::MemberDeleted { member } => format!("deleted member {}", member.id),
    }
}

pub fn run(
    config: &LedgerConfig,
    script: String,
    empty: bool,
    today: Option<NaiveDate>,
    json_output: bool,
) {
    let entries = read_script_from_path(&script).unwrap_or_else(|e| {
        eprintln!("error: failed to read {script}: {e}");
        std::process::exit(1);
    });
    let mut ledger = if empty {
        Ledger::new(config.clone())
    } else {
        demo_ledger_or_exit(config)
    };
    let today = today_or_default(today);

    let mut applied = Vec::with_capacity(entries.len());
    for entry in entries {
        let op = entry.command.name();
        match ledger.apply(entry.command, today) {
            Ok(outcome) => applied.push((entry.line, op, outcome)),
            Err(e) => {
                eprintln!("error: line {} ({op}): {e}", entry.line);
                std::process::exit(1);
            }
        }
    }

    let summary = ledger.summary(today);
    let report = ledger.check_consistency();

    if json_output {
        let outcomes = applied
            .iter()
            .map(|(line, op, outcome)| {
                json!({
                    "line": line,
                    "op": op,
                    "outcome": outcome
                })
            })
            .collect::<Vec<_>>();
        let payload = json!({
            "action": "run",
            "script": script,
            "today": today,
            "applied": outcomes.len(),
            "outcomes": outcomes,
            "journal": ledger.journal().events(),
            "summary": summary,
            "consistency": report.result
        });
        print_json(&payload);
    } else {
        println!(
            "libhub run\n  Script: {script}\n  Today: {today}\n  Applied: {}",
            applied.len()
        );
        for (line, op, outcome) in &applied {
            println!("  - line {line} {op}: {}", describe(outcome));
        }
        println!(
            "  Books: {} ({} available), active loans: {}, fines collected: {}",
            summary.total_books,
            summary.available_books,
            summary.active_loans.len(),
            summary.total_fines
        );
    }

    if !report.accepted() {
        eprintln!("error: ledger failed its consistency check after the script");
        std::process::exit(1);
    }
}
