use crate::support::{demo_ledger_or_exit, print_json};
use libhub_ledger::{Book, LedgerConfig};
use serde_json::json;

pub fn run(config: &LedgerConfig, search: Option<String>, json_output: bool) {
    let ledger = demo_ledger_or_exit(config);
    let query = search.unwrap_or_default();
    let rows: Vec<&Book> = ledger.search_books(&query);

    if json_output {
        let payload = json!({
            "action": "books.list",
            "query": query,
            "count": rows.len(),
            "items": rows
        });
        print_json(&payload);
    } else {
        println!("libhub books\n  Count: {}", rows.len());
        for book in rows {
            println!(
                "  - {} [{}] {} by {} ({}, {})",
                book.id,
                if book.available { "available" } else { "on loan" },
                book.title,
                book.author,
                book.category,
                book.published_year
            );
        }
    }
}
