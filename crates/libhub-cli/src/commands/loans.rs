use crate::support::{demo_ledger_or_exit, print_json, today_or_default};
use chrono::NaiveDate;
use libhub_ledger::{Issue, LedgerConfig};
use serde_json::json;

pub fn run(
    config: &LedgerConfig,
    member: Option<String>,
    active_only: bool,
    today: Option<NaiveDate>,
    json_output: bool,
) {
    let ledger = demo_ledger_or_exit(config);
    let today = today_or_default(today);
    let policy = ledger.fine_policy();

    let rows: Vec<&Issue> = match member.as_deref() {
        Some(member_id) => {
            if ledger.member(member_id).is_none() {
                eprintln!("error: member not found: {member_id}");
                std::process::exit(1);
            }
            ledger.member_issues(member_id)
        }
        None => ledger.issues().collect(),
    }
    .into_iter()
    .filter(|issue| !active_only || issue.is_active())
    .collect();

    if json_output {
        let items = rows
            .iter()
            .map(|issue| {
                json!({
                    "id": issue.id,
                    "bookId": issue.book_id,
                    "memberId": issue.member_id,
                    "issueDate": issue.issue_date,
                    "dueDate": issue.due_date,
                    "returnDate": issue.return_date,
                    "returned": issue.returned,
                    "overdue": issue.is_overdue(today),
                    "fine": issue.accrued_fine(&policy, today)
                })
            })
            .collect::<Vec<_>>();
        let payload = json!({
            "action": "loans.list",
            "today": today,
            "member": member,
            "count": items.len(),
            "items": items
        });
        print_json(&payload);
    } else {
        println!("libhub loans\n  Today: {today}\n  Count: {}", rows.len());
        for issue in rows {
            let state = match issue.return_date {
                Some(returned) => format!("returned {returned}"),
                None if issue.is_overdue(today) => "overdue".to_string(),
                None => "out".to_string(),
            };
            println!(
                "  - {} {} -> {} due {} [{state}] fine {}",
                issue.id,
                issue.book_id,
                issue.member_id,
                issue.due_date,
                issue.accrued_fine(&policy, today)
            );
        }
    }
}
