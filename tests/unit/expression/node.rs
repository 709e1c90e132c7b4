use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn terminal_kind_follows_mod3_then_parity() {
    assert_eq!(TerminalKind::from_value(9.0), TerminalKind::X);
    assert_eq!(TerminalKind::from_value(9.99), TerminalKind::X);
    assert_eq!(TerminalKind::from_value(8.0), TerminalKind::Xy);
    assert_eq!(TerminalKind::from_value(7.2), TerminalKind::Y);
    assert_eq!(TerminalKind::from_value(0.0), TerminalKind::X);
    // Negative seeds use floored remainders: -4 mod 3 == 2, -4 mod 2 == 0.
    assert_eq!(TerminalKind::from_value(-4.0), TerminalKind::Xy);
    assert_eq!(TerminalKind::from_value(-2.0), TerminalKind::Xy);
    assert_eq!(TerminalKind::from_value(-1.0), TerminalKind::Y);
    // Truncation toward zero before the remainder.
    assert_eq!(TerminalKind::from_value(-1.5), TerminalKind::Y);
}

#[test]
fn terminals_evaluate_and_render() {
    let x = Expr::terminal(TerminalKind::X);
    let y = Expr::terminal(TerminalKind::Y);
    let xy = Expr::terminal(TerminalKind::Xy);
    assert_eq!(x.evaluate(0.25, -0.5), 0.25);
    assert_eq!(y.evaluate(0.25, -0.5), -0.5);
    assert_eq!(xy.evaluate(0.25, -0.5), -0.125);
    assert_eq!(x.to_display_string(), "x");
    assert_eq!(y.to_display_string(), "y");
    assert_eq!(xy.to_display_string(), "xy");
}

#[test]
fn composite_nodes_evaluate() {
    let s = Expr::sine(Expr::terminal(TerminalKind::X));
    assert!(close(s.evaluate(0.5, 0.0), 1.0));
    assert!(close(s.evaluate(0.0, 0.7), 0.0));

    let c = Expr::cosine(Expr::terminal(TerminalKind::Y));
    assert!(close(c.evaluate(0.3, 1.0), -1.0));
    assert!(close(c.evaluate(0.3, 0.0), 1.0));

    let p = Expr::product(
        Expr::terminal(TerminalKind::X),
        Expr::terminal(TerminalKind::Y),
    );
    assert_eq!(p.evaluate(0.5, -0.5), -0.25);
}

#[test]
fn display_string_is_recursive() {
    let e = Expr::sine(Expr::product(
        Expr::cosine(Expr::terminal(TerminalKind::Xy)),
        Expr::terminal(TerminalKind::Y),
    ));
    assert_eq!(e.to_display_string(), "sin(pi*cos(pi*xy)*y)");
    assert_eq!(e.to_string(), e.to_display_string());
}

#[test]
fn depth_and_node_count() {
    let leaf = Expr::terminal(TerminalKind::X);
    assert_eq!(leaf.depth(), 0);
    assert_eq!(leaf.node_count(), 1);

    let e = Expr::product(Expr::sine(leaf.clone()), leaf);
    assert_eq!(e.depth(), 2);
    assert_eq!(e.node_count(), 4);
}

#[test]
fn serializes_with_op_tag() {
    let e = Expr::cosine(Expr::terminal(TerminalKind::Xy));
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["op"], "cosine");
    assert_eq!(v["arg"]["op"], "terminal");
    assert_eq!(v["arg"]["kind"], "Xy");
    let back: Expr = serde_json::from_value(v).unwrap();
    assert_eq!(back, e);
}
