//! Seed-driven construction of [`Expr`] trees.
//!
//! The seed picks a rule at each level and is decayed before it is handed to children. The hard
//! depth cap forces a terminal at [`MAX_DEPTH`], so every tree has at most `2^7 - 1` nodes.

use std::f64::consts::PI;

use crate::expression::node::{Expr, TerminalKind};

/// Depth at which construction always emits a terminal.
pub const MAX_DEPTH: u32 = 6;

const ROOT_PRODUCT_BELOW: f64 = 40.0;
const ROOT_COSINE_BELOW: f64 = 30.0;
const PRODUCT_RESEED_BELOW: f64 = 50.0;
const PRODUCT_RESEED: f64 = 12.0;
const PRODUCT_DECAY: f64 = 0.8;
const TRIG_DECAY: f64 = 0.9;

/// Grammar rule chosen for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Two children multiplied together.
    Product,
    /// `sin(pi * child)`.
    Sine,
    /// `cos(pi * child)`.
    Cosine,
    /// Leaf.
    Terminal,
}

/// Rule for the root node.
///
/// The cosine arm is kept but can never fire: any value reaching it is already `>= 40`.
pub fn root_rule(value: f64) -> Rule {
    if value < ROOT_PRODUCT_BELOW {
        Rule::Product
    } else if value < ROOT_COSINE_BELOW {
        Rule::Cosine
    } else {
        Rule::Sine
    }
}

/// Rule for a node at `depth`.
pub fn select_rule(value: f64, depth: u32) -> Rule {
    if depth == 0 {
        return root_rule(value);
    }
    if depth >= MAX_DEPTH {
        return Rule::Terminal;
    }
    let n = value as i64;
    if n.rem_euclid(3) == 0 {
        Rule::Sine
    } else if n.rem_euclid(2) == 0 {
        Rule::Cosine
    } else {
        Rule::Product
    }
}

/// Build a full tree from a channel seed (entry depth 0).
#[tracing::instrument]
pub fn build_expr(value: f64) -> Expr {
    let expr = build_expr_at(value, 0);
    tracing::debug!(
        nodes = expr.node_count(),
        depth = expr.depth(),
        expr = %expr,
        "built expression"
    );
    expr
}

/// Build a subtree as if reached at `depth`.
pub fn build_expr_at(value: f64, depth: u32) -> Expr {
    match select_rule(value, depth) {
        Rule::Terminal => Expr::terminal(TerminalKind::from_value(value)),
        Rule::Product => {
            // The root product works on the seed scaled by pi.
            let value = if depth == 0 { value * PI } else { value };
            build_product(value, depth)
        }
        Rule::Sine => Expr::sine(build_trig_arg(value, depth)),
        Rule::Cosine => Expr::cosine(build_trig_arg(value, depth)),
    }
}

fn build_product(value: f64, depth: u32) -> Expr {
    let value = if value < PRODUCT_RESEED_BELOW {
        PRODUCT_RESEED
    } else {
        value
    };
    let child = value * PRODUCT_DECAY;
    Expr::product(
        build_expr_at(child, depth + 1),
        build_expr_at(child, depth + 1),
    )
}

fn build_trig_arg(value: f64, depth: u32) -> Expr {
    build_expr_at(value.trunc() * TRIG_DECAY, depth + 1)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/grammar.rs"]
mod tests;
