//! libhub CLI: the `libhub` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_tracing(cli.verbose);
    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Books { search, json } => commands::books::run(&config, search, json),

        Commands::Members { search, json } => commands::members::run(&config, search, json),

        Commands::Loans {
            member,
            active,
            today,
            json,
        } => commands::loans::run(&config, member, active, today, json),

        Commands::Dashboard { today, json } => commands::dashboard::run(&config, today, json),

        Commands::Fine {
            due,
            returned,
            today,
            json,
        } => commands::fine::run(&config, due, returned, today, json),

        Commands::Run {
            script,
            empty,
            today,
            json,
        } => commands::run::run(&config, script, empty, today, json),

        Commands::Check { json } => commands::check::run(&config, json),

        Commands::Login {
            username,
            password,
            json,
        } => commands::login::run(&config, username, password, json),
    }
}
