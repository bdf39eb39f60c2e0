use crate::support::print_json;
use libhub_ledger::{Authenticator, Credentials, LedgerConfig, StaticAuthenticator};
use serde_json::json;

pub fn run(config: &LedgerConfig, username: String, password: String, json_output: bool) {
    let authenticator = StaticAuthenticator::from_config(&config.auth);
    let credentials = Credentials::new(username, password);

    match authenticator.authenticate(&credentials) {
        Ok(session) => {
            if json_output {
                print_json(&json!({
                    "action": "login",
                    "result": "accepted",
                    "session": session
                }));
            } else {
                println!("libhub login\n  Welcome, {}", session.username);
            }
        }
        Err(e) => {
            if json_output {
                print_json(&json!({
                    "action": "login",
                    "result": "rejected",
                    "error": e.to_string()
                }));
            }
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
