use crate::support::{print_json, today_or_default};
use chrono::NaiveDate;
use libhub_ledger::{LedgerConfig, overdue_days};
use serde_json::json;

pub fn run(
    config: &LedgerConfig,
    due: NaiveDate,
    returned: Option<NaiveDate>,
    today: Option<NaiveDate>,
    json_output: bool,
) {
    let today = today_or_default(today);
    let policy = config.fine_policy();
    let fine = policy.calculate(due, returned, today);
    let days = overdue_days(due, returned.unwrap_or(today));

    if json_output {
        let payload = json!({
            "action": "fine",
            "dueDate": due,
            "returnDate": returned,
            "today": today,
            "finePerDay": policy.fine_per_day,
            "overdueDays": days,
            "fine": fine
        });
        print_json(&payload);
    } else {
        println!(
            "libhub fine\n  Due: {due}\n  Measured at: {}\n  Overdue days: {days}\n  Fine: {fine}",
            returned.unwrap_or(today)
        );
    }
}
