use crate::error::{Error, RewriteError};
use crate::matching::{Bindings, instantiate, pattern_match};
use crate::registry::RuleRegistry;
use crate::types::{Rule, Strategy, Term};

/// Limits for a single rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Deepest nesting of strategy re-runs before giving up with
    /// `RewriteError::NonConvergence`. Descending into the target's own
    /// children is not counted.
    pub max_depth: usize,
}

impl RewriteConfig {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// One successful match during a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    /// The subterm the head matched
    pub site: Term,
    pub bindings: Bindings,
}

/// Applies a single rule to a target term.
///
/// Sites are tried outermost first: if the head matches the whole target the
/// body is instantiated one level deep and the children at that level are left
/// alone. Otherwise the node is rebuilt with every child rewritten by the same
/// rule. With `Strategy::All` the rule is then re-run over the substituted
/// material.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter {
    config: RewriteConfig,
}

impl Rewriter {
    pub fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RewriteConfig {
        self.config
    }

    pub fn apply(
        &self,
        rule: &Rule,
        target: &Term,
        strategy: Strategy,
    ) -> Result<Term, RewriteError> {
        self.apply_traced(rule, target, strategy).map(|(term, _)| term)
    }

    /// Like `apply`, but also returns every match that fired, in firing order.
    pub fn apply_traced(
        &self,
        rule: &Rule,
        target: &Term,
        strategy: Strategy,
    ) -> Result<(Term, Vec<Firing>), RewriteError> {
        let mut pass = Pass {
            rule,
            strategy,
            limit: self.config.max_depth,
            firings: Vec::new(),
        };
        let term = pass.rewrite(target, 0)?;
        Ok((term, pass.firings))
    }
}

struct Pass<'r> {
    rule: &'r Rule,
    strategy: Strategy,
    limit: usize,
    firings: Vec<Firing>,
}

impl Pass<'_> {
    fn rewrite(&mut self, target: &Term, depth: usize) -> Result<Term, RewriteError> {
        if depth > self.limit {
            return Err(RewriteError::NonConvergence {
                rule: self.rule.name.clone(),
                limit: self.limit,
            });
        }

        if let Some(bindings) = pattern_match(&self.rule.head, target) {
            let body = instantiate(&self.rule.body, &bindings);
            self.firings.push(Firing {
                site: target.clone(),
                bindings,
            });
            return match self.strategy {
                Strategy::First => Ok(body),
                Strategy::All => self.revisit(body, depth),
            };
        }

        self.descend(target, depth)
    }

    /// Rebuild `target` with the same shape, rewriting each child at the same depth.
    fn descend(&mut self, target: &Term, depth: usize) -> Result<Term, RewriteError> {
        match target {
            Term::Symbol(_) | Term::Variable(_) => Ok(target.clone()),
            Term::Function(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.rewrite(arg, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Function(name.clone(), args))
            }
            Term::Operator(left, op, right) => {
                let left = self.rewrite(left, depth)?;
                let right = self.rewrite(right, depth)?;
                Ok(Term::operator(left, op.clone(), right))
            }
        }
    }

    /// Re-run the rule over an instantiated body, one level deeper.
    fn revisit(&mut self, body: Term, depth: usize) -> Result<Term, RewriteError> {
        let rule = self.rule;
        match &rule.body {
            // the whole body is substituted material
            Term::Variable(_) => self.rewrite(&body, depth + 1),
            Term::Symbol(_) => Ok(body),
            Term::Function(..) | Term::Operator(..) => self.descend(&body, depth + 1),
        }
    }
}

/// Rule registry plus a rewriter: the surface the front end talks to.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: RuleRegistry,
    rewriter: Rewriter,
}

impl Engine {
    pub fn new(config: RewriteConfig) -> Self {
        Self::with_registry(RuleRegistry::new(), config)
    }

    pub fn with_registry(registry: RuleRegistry, config: RewriteConfig) -> Self {
        Self {
            registry,
            rewriter: Rewriter::new(config),
        }
    }

    /// Register `name := head = body`, replacing any earlier rule of that name.
    pub fn declare_rule<S: Into<String>>(&mut self, name: S, head: Term, body: Term) -> Rule {
        let rule = Rule::new(name, head, body);
        self.registry.declare(rule.clone());
        rule
    }

    pub fn apply_rule(&self, name: &str, target: &Term, strategy: Strategy) -> Result<Term, Error> {
        let rule = self.resolve(name)?;
        Ok(self.rewriter.apply(rule, target, strategy)?)
    }

    pub fn apply_rule_traced(
        &self,
        name: &str,
        target: &Term,
        strategy: Strategy,
    ) -> Result<(Term, Vec<Firing>), Error> {
        let rule = self.resolve(name)?;
        Ok(self.rewriter.apply_traced(rule, target, strategy)?)
    }

    fn resolve(&self, name: &str) -> Result<&Rule, Error> {
        self.registry
            .resolve(name)
            .ok_or_else(|| Error::UnknownRule(name.to_string()))
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> RewriteConfig {
        self.rewriter.config()
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.rewriter = Rewriter::new(RewriteConfig::new(max_depth));
    }
}
