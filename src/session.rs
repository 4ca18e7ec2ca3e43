use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::engine::{Engine, Firing, RewriteConfig};
use crate::error::{Error, Result};
use crate::formatter::render_term;
use crate::parser::{Statement, parse_statement};
use crate::types::{Rule, Strategy, Term};

/// What executing one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Declared(Rule),
    Rewritten { term: Term, firings: Vec<Firing> },
    /// A bare expression, echoed back
    Evaluated(Term),
    Empty,
    Quit,
}

/// Driver-side state threaded through a run: the rules, the most recent
/// result (the implicit operand of `apply name`), and the debug flag.
#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    last: Option<Term>,
    pub debug: bool,
}

impl Session {
    pub fn new(config: RewriteConfig) -> Self {
        Self {
            engine: Engine::new(config),
            last: None,
            debug: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn last(&self) -> Option<&Term> {
        self.last.as_ref()
    }

    /// Drop one rule by name. The last result is kept.
    pub fn forget(&mut self, name: &str) -> Result<Rule> {
        let rule = self
            .engine
            .registry_mut()
            .remove(name)
            .ok_or_else(|| Error::UnknownRule(name.to_string()))?;
        debug!(rule = %rule, "forgot rule");
        Ok(rule)
    }

    /// Forget every rule and the last result.
    pub fn clear(&mut self) {
        self.engine.registry_mut().clear();
        self.last = None;
    }

    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let statement = parse_statement(line)?;
        self.run(statement)
    }

    pub fn run(&mut self, statement: Statement) -> Result<Outcome> {
        match statement {
            Statement::Declare(rule) => {
                let rule = self
                    .engine
                    .declare_rule(rule.name, rule.head, rule.body);
                debug!(rule = %rule, "declared rule");
                Ok(Outcome::Declared(rule))
            }
            Statement::Apply {
                rule,
                strategy,
                target,
            } => self.apply(&rule, strategy, target),
            Statement::Expr(term) => {
                self.last = Some(term.clone());
                Ok(Outcome::Evaluated(term))
            }
            Statement::Empty => Ok(Outcome::Empty),
            Statement::Quit => Ok(Outcome::Quit),
        }
    }

    fn apply(&mut self, rule: &str, strategy: Strategy, target: Option<Term>) -> Result<Outcome> {
        let target = match target {
            Some(term) => term,
            None => self.last.clone().ok_or(Error::NoPreviousResult)?,
        };

        let (term, firings) = self
            .engine
            .apply_rule_traced(rule, &target, strategy)
            .inspect_err(|e| warn!(rule, error = %e, "apply failed"))?;

        debug!(
            rule,
            strategy = strategy.name(),
            target = %render_term(&target),
            result = %render_term(&term),
            depth = term.depth(),
            ground = term.is_ground(),
            fired = firings.len(),
            "applied rule"
        );

        self.last = Some(term.clone());
        Ok(Outcome::Rewritten { term, firings })
    }

    /// Run every line of a script, reporting each line's outcome with its
    /// 1-based line number. A failing line does not stop the script; `quit` does.
    pub fn run_script(&mut self, source: &str) -> Vec<(usize, Result<Outcome>)> {
        let mut results = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let outcome = self.execute(line);
            let quit = matches!(outcome, Ok(Outcome::Quit));
            results.push((idx + 1, outcome));
            if quit {
                break;
            }
        }
        results
    }

    pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<(usize, Result<Outcome>)>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "running script");
        Ok(self.run_script(&source))
    }
}
