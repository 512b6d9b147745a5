// shutter/src/main.rs
//! Shutter entry point.
//!
//! Parses the command line, initializes logging and dispatches to the
//! subcommand implementations.

use anyhow::Result;
use clap::Parser;
use std::io;

use shutter::cli::{Cli, Commands};
use shutter::commands::{self, check, keywords, mask, rules};
use shutter::logger;
use shutter::utils::paths;

fn run(cli: Cli) -> Result<()> {
    let keywords_path = paths::keywords_path(cli.keywords_file.as_deref());
    let rules_path = paths::rules_path(cli.rules_file.as_deref());
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Mask(cmd) => {
            let store = commands::load_rule_store(&keywords_path, &rules_path)?;
            mask::run_mask(cmd, store, cli.quiet)
        }
        Commands::Scan(cmd) => {
            let store = commands::load_rule_store(&keywords_path, &rules_path)?;
            mask::run_scan(cmd, store, &mut stdout)
        }
        Commands::Check { texts } => {
            let store = commands::load_rule_store(&keywords_path, &rules_path)?;
            check::run_check(texts, &store, &mut stdout).map(|_| ())
        }
        Commands::Keywords(cmd) => keywords::run_keywords(cmd, &keywords_path, &mut stdout),
        Commands::Rules(cmd) => rules::run_rules(cmd, &rules_path, &mut stdout),
    }
}

fn main() -> Result<()> {
    // A missing .env file is the common case.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    run(cli)
}
