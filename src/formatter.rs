use std::fmt;

use crate::matching::Bindings;
use crate::types::{Rule, Term};

/// Canonical text of a term:
///   Symbol("A")                      -> "A"
///   Variable("x")                    -> "{x}"
///   Function("f", [a, b])            -> "f(a, b)"
///   Operator(Operator(A,+,B), *, C)  -> "(A+B)*C"
///
/// Operands are parenthesized only when they are operators themselves.
pub fn render_term(term: &Term) -> String {
    match term {
        Term::Symbol(name) => name.clone(),
        Term::Variable(name) => format!("{{{name}}}"),
        Term::Function(name, args) => {
            let inner = args.iter().map(render_term).collect::<Vec<_>>().join(", ");
            format!("{name}({inner})")
        }
        Term::Operator(left, op, right) => {
            format!("{}{}{}", render_operand(left), op, render_operand(right))
        }
    }
}

fn render_operand(term: &Term) -> String {
    match term {
        Term::Operator(..) => format!("({})", render_term(term)),
        _ => render_term(term),
    }
}

/// `name := head = body`
pub fn render_rule(rule: &Rule) -> String {
    format!(
        "{} := {} = {}",
        rule.name,
        render_term(&rule.head),
        render_term(&rule.body)
    )
}

/// One `{var} => term` line per binding, sorted by variable name.
pub fn render_bindings(bindings: &Bindings) -> String {
    if bindings.is_empty() {
        return "{}".to_string();
    }

    let mut entries: Vec<_> = bindings.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let inner = entries
        .iter()
        .map(|(name, term)| format!("  {{{name}}} => {}", render_term(term)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{{\n{inner}\n}}")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_term(self))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_rule(self))
    }
}
