pub mod engine;
pub mod error;
pub mod formatter;
pub mod matching;
pub mod parser;
pub mod registry;
pub mod repl;
pub mod session;
pub mod types;

pub use crate::engine::{Engine, Firing, RewriteConfig, Rewriter};
pub use crate::error::{Error, ParseError, RewriteError};
pub use crate::formatter::render_term;
pub use crate::matching::{Bindings, pattern_match};
pub use crate::registry::RuleRegistry;
pub use crate::types::{Rule, Strategy, Term};
