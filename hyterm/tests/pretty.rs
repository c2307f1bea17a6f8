use hyterm::prelude::*;
use termcolor::{Buffer, WriteColor};

fn inv() -> Symbol {
    Symbol::intern("Inv")
}

#[test]
fn prints_fact_clause() {
    let x = Symbol::intern("x");
    let fact = forall(
        [(x, Sort::Int)],
        implies(eq(sym(x), int(0)), app(inv(), [sym(x)])),
    );
    assert_eq!(fact.to_string(), "forall x: Int. x = 0 => Inv(x)");
}

#[test]
fn prints_transition_clause() {
    let x = Symbol::intern("x");
    let y = Symbol::intern("y");
    let step = forall(
        [(x, Sort::Int), (y, Sort::Int)],
        implies(
            app(inv(), [sym(x)]) & eq(sym(y), add(sym(x), int(1))),
            app(inv(), [sym(y)]),
        ),
    );
    assert_eq!(
        step.to_string(),
        "forall x: Int, y: Int. Inv(x) /\\ y = x + 1 => Inv(y)"
    );
}

#[test]
fn parenthesizes_by_precedence() {
    let a = var("a");
    let b = var("b");
    let c = var("c");
    assert_eq!(not(a.clone() & b.clone()).to_string(), "!(a /\\ b)");
    assert_eq!((a.clone() | b.clone()).to_string(), "a \\/ b");
    assert_eq!(
        ((a.clone() | b.clone()) & c.clone()).to_string(),
        "(a \\/ b) /\\ c"
    );
    assert_eq!(
        implies(implies(a.clone(), b.clone()), c.clone()).to_string(),
        "(a => b) => c"
    );
    assert_eq!(mul(add(a.clone(), b.clone()), c.clone()).to_string(), "(a + b) * c");
    assert_eq!(sub(a, sub(b, c)).to_string(), "a - (b - c)");
}

#[test]
fn prints_constants_and_sorts() {
    assert_eq!(tt().to_string(), "true");
    assert_eq!(implies(var("a"), ff()).to_string(), "a => false");
    assert_eq!(int(-4).to_string(), "-4");
    let bv = forall([(Symbol::intern("v"), Sort::BitVec(8))], tt());
    assert_eq!(bv.to_string(), "forall v: BitVec<8>. true");
    assert_eq!(
        ite(var("a"), int(1), int(2)).to_string(),
        "if a then 1 else 2"
    );
}

#[test]
fn narrow_width_breaks_lines() {
    let long = and((0..12).map(|i| gt(var("pr_long"), int(i))));
    let narrow = long.pretty(20);
    assert!(narrow.lines().count() > 1);
    assert_eq!(long.pretty(1000).lines().count(), 1);
}

#[test]
fn colored_render_contains_plain_text() {
    let e = implies(var("a"), app(inv(), [var("a")]));
    let mut buffer = Buffer::no_color();
    e.pretty_render_to(80, &mut buffer).unwrap();
    assert!(!buffer.supports_color());
    assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "a => Inv(a)");
}

#[test]
fn every_operator_prints_its_symbol() {
    use strum::IntoEnumIterator;

    for bin in BinOp::iter() {
        let symbol: &'static str = bin.into();
        assert_eq!(symbol, bin.to_string());
        assert_eq!(
            binary(bin, var("pr_l"), var("pr_r")).to_string(),
            format!("pr_l {} pr_r", symbol)
        );
    }
}
