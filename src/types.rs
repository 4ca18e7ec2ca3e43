use std::collections::VecDeque;

/// An expression tree.
///
/// Terms are plain values: equality and hashing are structural, and every
/// rewrite builds a fresh tree instead of touching an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An atomic constant, e.g. "zero", "A", "one"
    Symbol(String),

    /// A pattern placeholder, written `{x}`; only meaningful in rule heads and bodies
    Variable(String),

    /// `name(arg, ...)`; argument order matters, the length is the arity
    Function(String, Vec<Term>),

    /// `left op right`; the operator name is never evaluated
    Operator(Box<Term>, String, Box<Term>),
}

impl Term {
    pub fn symbol<S: Into<String>>(name: S) -> Term {
        Term::Symbol(name.into())
    }

    pub fn variable<S: Into<String>>(name: S) -> Term {
        Term::Variable(name.into())
    }

    pub fn function<S: Into<String>>(name: S, args: Vec<Term>) -> Term {
        Term::Function(name.into(), args)
    }

    pub fn operator<S: Into<String>>(left: Term, op: S, right: Term) -> Term {
        Term::Operator(Box::new(left), op.into(), Box::new(right))
    }

    /// Immediate children, left to right. Leaves have none.
    pub fn children(&self) -> Vec<&Term> {
        match self {
            Term::Symbol(_) | Term::Variable(_) => Vec::new(),
            Term::Function(_, args) => args.iter().collect(),
            Term::Operator(left, _, right) => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Every node of the tree in breadth-first order, starting with `self`.
    pub fn subterms(&self) -> Vec<&Term> {
        let mut queue = VecDeque::from([self]);
        let mut nodes = Vec::new();

        while let Some(node) = queue.pop_front() {
            nodes.push(node);
            queue.extend(node.children());
        }

        nodes
    }

    /// Height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Term::depth)
            .max()
            .unwrap_or(0)
    }

    /// True when no `Variable` occurs anywhere in the term.
    pub fn is_ground(&self) -> bool {
        self.subterms()
            .iter()
            .all(|t| !matches!(t, Term::Variable(_)))
    }

    /// Distinct variable names, in order of first (breadth-first) occurrence.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for node in self.subterms() {
            if let Term::Variable(name) = node {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }
}

/// A named rewrite rule: `name := head = body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    /// Pattern tried against each site of a target
    pub head: Term,
    /// Template instantiated with the bindings of a successful match
    pub body: Term,
}

impl Rule {
    pub fn new<S: Into<String>>(name: S, head: Term, body: Term) -> Self {
        Self {
            name: name.into(),
            head,
            body,
        }
    }
}

/// How much of an instantiated template the rewriter revisits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Instantiate the template once and stop ("first")
    #[default]
    First,

    /// Re-run the rule over the substituted material ("all")
    All,
}

impl Strategy {
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name {
            "first" => Some(Strategy::First),
            "all" => Some(Strategy::All),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::First => "first",
            Strategy::All => "all",
        }
    }
}
