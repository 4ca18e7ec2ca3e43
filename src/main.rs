//! mold CLI entry point.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use mold::RewriteConfig;
use mold::repl::{Repl, report, report_error};
use mold::session::{Outcome, Session};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut session = Session::new(RewriteConfig::new(cli.max_depth));
    session.debug = cli.debug;

    for path in &cli.scripts {
        let results = match session.run_file(path) {
            Ok(results) => results,
            Err(err) => {
                report_error(&err);
                continue;
            }
        };

        for (line, result) in &results {
            match result {
                Ok(Outcome::Quit) => return Ok(()),
                Ok(outcome) => report(outcome, session.debug),
                Err(err) => eprintln!("Error: {}:{line}: {err}", path.display()),
            }
        }
    }

    if cli.wants_repl() {
        let mut repl = Repl::new(session)?;
        repl.run()?;
    }

    Ok(())
}
