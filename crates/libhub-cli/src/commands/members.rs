use crate::support::{demo_ledger_or_exit, print_json};
use libhub_ledger::LedgerConfig;
use serde_json::json;

pub fn run(config: &LedgerConfig, search: Option<String>, json_output: bool) {
    let ledger = demo_ledger_or_exit(config);
    let query = search.unwrap_or_default();
    let rows = ledger.search_members(&query);

    if json_output {
        let items = rows
            .iter()
            .map(|member| {
                let history = ledger.member_issues(member.id.as_str());
                json!({
                    "id": member.id,
                    "name": member.name,
                    "email": member.email,
                    "phone": member.phone,
                    "joinDate": member.join_date,
                    "borrowed": history.len(),
                    "activeLoans": history.iter().filter(|issue| issue.is_active()).count()
                })
            })
            .collect::<Vec<_>>();
        let payload = json!({
            "action": "members.list",
            "query": query,
            "count": items.len(),
            "items": items
        });
        print_json(&payload);
    } else {
        println!("libhub members\n  Count: {}", rows.len());
        for member in rows {
            let active = ledger
                .member_issues(member.id.as_str())
                .iter()
                .filter(|issue| issue.is_active())
                .count();
            println!(
                "  - {} {} <{}> joined {} (active loans: {active})",
                member.id, member.name, member.email, member.join_date
            );
        }
    }
}
