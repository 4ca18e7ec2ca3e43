//! Command-line interface for the mold rewriter.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "mold")]
#[command(about = "Symbolic term rewriting: declare rules, apply them to expressions", long_about = None)]
pub struct Cli {
    /// Scripts to run in order before (or instead of) the REPL
    #[arg(value_name = "SCRIPT")]
    pub scripts: Vec<PathBuf>,

    /// Deepest nesting of rewrite calls before a rewrite is reported as non-converging
    #[arg(long, value_name = "N", default_value_t = 256)]
    pub max_depth: usize,

    /// Print the binding table of every match that fires
    #[arg(long)]
    pub debug: bool,

    /// Enter the REPL after running the scripts
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    pub fn wants_repl(&self) -> bool {
        self.scripts.is_empty() || self.interactive
    }
}
