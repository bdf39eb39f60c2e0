use crate::support::{demo_ledger_or_exit, print_json};
use libhub_ledger::{ConsistencyReport, LedgerConfig};

fn print_report(report: &ConsistencyReport) {
    println!(
        "[ledger] {} (books={}, members={}, issues={}, active={})",
        if report.accepted() { "OK" } else { "FAIL" },
        report.summary.book_count,
        report.summary.member_count,
        report.summary.issue_count,
        report.summary.active_issue_count
    );
    for finding in &report.findings {
        println!(
            "  - {} {} ({})",
            finding.subject_id, finding.class, finding.message
        );
    }
}

pub fn run(config: &LedgerConfig, json_output: bool) {
    let ledger = demo_ledger_or_exit(config);
    let report = ledger.check_consistency();

    if json_output {
        print_json(&report);
    } else {
        print_report(&report);
    }

    if !report.accepted() {
        std::process::exit(1);
    }
}
