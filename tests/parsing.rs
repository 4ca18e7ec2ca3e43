use mold::parser::{Statement, parse_statement, parse_term};
use mold::types::{Rule, Strategy, Term};

fn sym(name: &str) -> Term {
    Term::symbol(name)
}

fn op(left: Term, name: &str, right: Term) -> Term {
    Term::operator(left, name, right)
}

#[test]
fn parses_each_term_kind() {
    assert_eq!(parse_term("zero").unwrap(), sym("zero"));
    assert_eq!(parse_term("{x}").unwrap(), Term::variable("x"));
    assert_eq!(parse_term("f()").unwrap(), Term::function("f", vec![]));
    assert_eq!(
        parse_term("f(a, {x}, g(b))").unwrap(),
        Term::function(
            "f",
            vec![
                sym("a"),
                Term::variable("x"),
                Term::function("g", vec![sym("b")]),
            ],
        )
    );
    assert_eq!(parse_term("a + b").unwrap(), op(sym("a"), "+", sym("b")));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        parse_term("a + b * c").unwrap(),
        op(sym("a"), "+", op(sym("b"), "*", sym("c")))
    );
    assert_eq!(
        parse_term("(a + b) * c").unwrap(),
        op(op(sym("a"), "+", sym("b")), "*", sym("c"))
    );
}

#[test]
fn subtraction_is_left_associative_and_power_right() {
    assert_eq!(
        parse_term("a - b - c").unwrap(),
        op(op(sym("a"), "-", sym("b")), "-", sym("c"))
    );
    assert_eq!(
        parse_term("a ^ b ^ c").unwrap(),
        op(sym("a"), "^", op(sym("b"), "^", sym("c")))
    );
}

#[test]
fn unknown_operators_bind_loosest() {
    assert_eq!(
        parse_term("a <> b + c").unwrap(),
        op(sym("a"), "<>", op(sym("b"), "+", sym("c")))
    );
}

#[test]
fn parses_rule_declaration() {
    assert_eq!(
        parse_statement("double := double({x}) = add({x}, {x})").unwrap(),
        Statement::Declare(Rule::new(
            "double",
            parse_term("double({x})").unwrap(),
            parse_term("add({x}, {x})").unwrap(),
        ))
    );
}

#[test]
fn parses_apply_forms() {
    assert_eq!(
        parse_statement("apply inc(inc(zero))").unwrap(),
        Statement::Apply {
            rule: "inc".into(),
            strategy: Strategy::First,
            target: Some(parse_term("inc(zero)").unwrap()),
        }
    );
    assert_eq!(
        parse_statement("apply inc[all](inc(zero))").unwrap(),
        Statement::Apply {
            rule: "inc".into(),
            strategy: Strategy::All,
            target: Some(parse_term("inc(zero)").unwrap()),
        }
    );
    assert_eq!(
        parse_statement("apply inc[first]").unwrap(),
        Statement::Apply {
            rule: "inc".into(),
            strategy: Strategy::First,
            target: None,
        }
    );
    assert_eq!(
        parse_statement("apply inc").unwrap(),
        Statement::Apply {
            rule: "inc".into(),
            strategy: Strategy::First,
            target: None,
        }
    );
}

#[test]
fn parses_quit_blank_and_expressions() {
    assert_eq!(parse_statement("quit").unwrap(), Statement::Quit);
    assert_eq!(parse_statement("   ").unwrap(), Statement::Empty);
    assert_eq!(parse_statement("# note").unwrap(), Statement::Empty);
    assert_eq!(
        parse_statement("f(a) # trailing comment").unwrap(),
        Statement::Expr(Term::function("f", vec![sym("a")]))
    );
}

#[test]
fn reports_errors_with_offsets() {
    let err = parse_statement("apply inc[sideways](a)").unwrap_err();
    assert_eq!(err.offset, 10);
    assert!(err.message.contains("sideways"));

    let err = parse_term("f(a b)").unwrap_err();
    assert_eq!(err.offset, 4);

    let err = parse_statement("r := f({x})").unwrap_err();
    assert!(err.message.contains('='));

    let err = parse_term("f(a").unwrap_err();
    assert_eq!(err.offset, 3);

    assert!(parse_term("").is_err());
    assert!(parse_term("{}").is_err());
    assert!(parse_term("a +").is_err());
}
