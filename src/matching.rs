use std::collections::HashMap;

use crate::types::Term;

/// Binding table: variable name → the subterm it matched.
pub type Bindings = HashMap<String, Term>;

/// Public entry: match `pattern` against `subject`.
/// Returns the bindings only if the whole match succeeded.
pub fn pattern_match(pattern: &Term, subject: &Term) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    if match_pattern(pattern, subject, &mut bindings) {
        Some(bindings)
    } else {
        None
    }
}

/// Try to match `pattern` against `subject`, filling `bindings` as we go.
/// Returns true on successful match. On failure `bindings` may hold
/// partial entries and should be thrown away.
///
/// Rules:
///   • Variable matches anything. If already bound, it must match the same term again.
///   • Symbol matches only the identical symbol.
///   • Function matches a function of the same name and arity, argument by argument.
///   • Operator matches an operator with the same name, left then right.
pub fn match_pattern(pattern: &Term, subject: &Term, bindings: &mut Bindings) -> bool {
    match (pattern, subject) {
        (Term::Variable(name), _) => {
            if let Some(bound) = bindings.get(name) {
                bound == subject
            } else {
                bindings.insert(name.clone(), subject.clone());
                true
            }
        }

        (Term::Symbol(p), Term::Symbol(s)) => p == s,

        (Term::Function(p_name, p_args), Term::Function(s_name, s_args)) => {
            if p_name != s_name || p_args.len() != s_args.len() {
                return false;
            }
            p_args
                .iter()
                .zip(s_args.iter())
                .all(|(p, s)| match_pattern(p, s, bindings))
        }

        (Term::Operator(p_left, p_op, p_right), Term::Operator(s_left, s_op, s_right)) => {
            p_op == s_op
                && match_pattern(p_left, s_left, bindings)
                && match_pattern(p_right, s_right, bindings)
        }

        _ => false,
    }
}

/// Instantiate `template` with `bindings` at every depth.
/// A variable with no binding is left as-is.
pub fn substitute(template: &Term, bindings: &Bindings) -> Term {
    match template {
        Term::Variable(name) => bindings
            .get(name)
            .cloned()
            .unwrap_or_else(|| template.clone()),
        Term::Symbol(_) => template.clone(),
        Term::Function(name, args) => Term::Function(
            name.clone(),
            args.iter().map(|arg| substitute(arg, bindings)).collect(),
        ),
        Term::Operator(left, op, right) => Term::operator(
            substitute(left, bindings),
            op.clone(),
            substitute(right, bindings),
        ),
    }
}

/// Fill one level of a rule body: the body itself when it is a bound
/// variable, or each immediate argument/operand that is a bound variable.
/// Anything nested deeper is copied as written.
pub fn instantiate(body: &Term, bindings: &Bindings) -> Term {
    let fill = |slot: &Term| match slot {
        Term::Variable(name) => bindings.get(name).cloned().unwrap_or_else(|| slot.clone()),
        _ => slot.clone(),
    };

    match body {
        Term::Variable(_) => fill(body),
        Term::Symbol(_) => body.clone(),
        Term::Function(name, args) => {
            Term::Function(name.clone(), args.iter().map(fill).collect())
        }
        Term::Operator(left, op, right) => {
            Term::operator(fill(left.as_ref()), op.clone(), fill(right.as_ref()))
        }
    }
}
