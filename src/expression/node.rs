use std::f64::consts::PI;
use std::fmt;

/// Leaf sub-form, fixed when the terminal is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TerminalKind {
    /// `f(x, y) = x`
    X,
    /// `f(x, y) = y`
    Y,
    /// `f(x, y) = x * y`
    Xy,
}

impl TerminalKind {
    /// Pick the sub-form for a seed value: `x` when `int(value) mod 3 == 0`, else `xy` when it is
    /// even, else `y`.
    pub fn from_value(value: f64) -> Self {
        let n = value as i64;
        if n.rem_euclid(3) == 0 {
            Self::X
        } else if n.rem_euclid(2) == 0 {
            Self::Xy
        } else {
            Self::Y
        }
    }

    fn evaluate(self, x: f64, y: f64) -> f64 {
        match self {
            Self::X => x,
            Self::Y => y,
            Self::Xy => x * y,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Xy => "xy",
        }
    }
}

/// Expression over `(x, y)` in `[-1, 1]^2`.
///
/// Every node owns its children; trees never share subexpressions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expr {
    /// Base case, no children.
    Terminal {
        /// Which coordinate function this leaf returns.
        kind: TerminalKind,
    },
    /// `lhs(x, y) * rhs(x, y)`
    Product {
        /// Left factor.
        lhs: Box<Expr>,
        /// Right factor.
        rhs: Box<Expr>,
    },
    /// `sin(pi * arg(x, y))`
    Sine {
        /// Inner expression.
        arg: Box<Expr>,
    },
    /// `cos(pi * arg(x, y))`
    Cosine {
        /// Inner expression.
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Leaf node.
    pub fn terminal(kind: TerminalKind) -> Self {
        Self::Terminal { kind }
    }

    /// Product of two subtrees.
    pub fn product(lhs: Expr, rhs: Expr) -> Self {
        Self::Product {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `sin(pi * arg)`.
    pub fn sine(arg: Expr) -> Self {
        Self::Sine { arg: Box::new(arg) }
    }

    /// `cos(pi * arg)`.
    pub fn cosine(arg: Expr) -> Self {
        Self::Cosine { arg: Box::new(arg) }
    }

    /// Evaluate at one point.
    ///
    /// For inputs in `[-1, 1]` the result stays in `[-1, 1]`; nothing clamps it.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Terminal { kind } => kind.evaluate(x, y),
            Self::Product { lhs, rhs } => lhs.evaluate(x, y) * rhs.evaluate(x, y),
            Self::Sine { arg } => (PI * arg.evaluate(x, y)).sin(),
            Self::Cosine { arg } => (PI * arg.evaluate(x, y)).cos(),
        }
    }

    /// Canonical string form, e.g. `sin(pi*x)*cos(pi*xy)`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Terminal { .. } => 0,
            Self::Product { lhs, rhs } => 1 + lhs.depth().max(rhs.depth()),
            Self::Sine { arg } | Self::Cosine { arg } => 1 + arg.depth(),
        }
    }

    /// Total nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Terminal { .. } => 1,
            Self::Product { lhs, rhs } => 1 + lhs.node_count() + rhs.node_count(),
            Self::Sine { arg } | Self::Cosine { arg } => 1 + arg.node_count(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal { kind } => f.write_str(kind.symbol()),
            Self::Product { lhs, rhs } => write!(f, "{lhs}*{rhs}"),
            Self::Sine { arg } => write!(f, "sin(pi*{arg})"),
            Self::Cosine { arg } => write!(f, "cos(pi*{arg})"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/node.rs"]
mod tests;
