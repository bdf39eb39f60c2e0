use crate::support::{demo_ledger_or_exit, print_json, today_or_default};
use chrono::NaiveDate;
use libhub_ledger::LedgerConfig;
use serde_json::json;

pub fn run(config: &LedgerConfig, today: Option<NaiveDate>, json_output: bool) {
    let ledger = demo_ledger_or_exit(config);
    let today = today_or_default(today);
    let summary = ledger.summary(today);

    if json_output {
        let payload = json!({
            "action": "dashboard",
            "today": today,
            "summary": summary
        });
        print_json(&payload);
        return;
    }

    println!(
        "libhub dashboard\n  Today: {today}\n  Books: {} ({} available)\n  Members: {}\n  Fines collected: {}",
        summary.total_books, summary.available_books, summary.total_members, summary.total_fines
    );
    if summary.active_loans.is_empty() {
        println!("  No active loans");
        return;
    }
    println!("  Active loans:");
    for row in &summary.active_loans {
        println!(
            "  - {} {} -> {} due {}{}",
            row.issue_id,
            row.book_title,
            row.member_name,
            row.due_date,
            if row.overdue {
                format!(" OVERDUE (fine {})", row.accrued_fine)
            } else {
                String::new()
            }
        );
    }
}
