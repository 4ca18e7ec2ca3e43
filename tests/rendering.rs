use insta::assert_snapshot;
use mold::formatter::{render_bindings, render_rule, render_term};
use mold::matching::pattern_match;
use mold::parser::parse_term;
use mold::types::{Rule, Term};

fn sym(name: &str) -> Term {
    Term::symbol(name)
}

#[test]
fn operator_operands_get_parentheses() {
    let t = Term::operator(Term::operator(sym("A"), "+", sym("B")), "*", sym("C"));
    assert_snapshot!(render_term(&t), @"(A+B)*C");

    let both = Term::operator(
        Term::operator(sym("a"), "-", sym("b")),
        "/",
        Term::operator(sym("c"), "^", sym("d")),
    );
    assert_snapshot!(render_term(&both), @"(a-b)/(c^d)");

    let plain = Term::operator(sym("x"), "<>", sym("y"));
    assert_snapshot!(render_term(&plain), @"x<>y");
}

#[test]
fn functions_variables_and_symbols() {
    let t = Term::function(
        "f",
        vec![
            sym("a"),
            Term::variable("x"),
            Term::function("g", vec![]),
            Term::operator(sym("p"), "+", sym("q")),
        ],
    );
    assert_snapshot!(render_term(&t), @"f(a, {x}, g(), p+q)");
}

#[test]
fn function_arguments_are_never_parenthesized() {
    let t = Term::operator(
        Term::function("f", vec![Term::operator(sym("a"), "+", sym("b"))]),
        "*",
        sym("c"),
    );
    assert_snapshot!(render_term(&t), @"f(a+b)*c");
}

#[test]
fn display_matches_render() {
    let t = parse_term("pair({x}, a*(b+c))").unwrap();
    assert_eq!(t.to_string(), render_term(&t));
    assert_snapshot!(t.to_string(), @"pair({x}, a*(b+c))");
}

#[test]
fn rules_render_as_declarations() {
    let rule = Rule::new(
        "double",
        parse_term("double({x})").unwrap(),
        parse_term("add({x}, {x})").unwrap(),
    );
    assert_snapshot!(render_rule(&rule), @"double := double({x}) = add({x}, {x})");
    assert_eq!(rule.to_string(), render_rule(&rule));
}

#[test]
fn bindings_render_sorted() {
    let pattern = parse_term("f({y}, {x}, {a})").unwrap();
    let subject = parse_term("f(two, one, g(zero))").unwrap();
    let bindings = pattern_match(&pattern, &subject).unwrap();

    assert_snapshot!(render_bindings(&bindings), @r"
    {
      {a} => g(zero)
      {x} => one
      {y} => two
    }
    ");
}

#[test]
fn empty_bindings_render_as_braces() {
    let bindings = pattern_match(&sym("a"), &sym("a")).unwrap();
    assert_snapshot!(render_bindings(&bindings), @"{}");
}
