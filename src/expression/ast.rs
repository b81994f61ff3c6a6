//! Abstract syntax tree produced by [`super::parser`] and its interpreter.

use std::fmt;

use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::errors::EvaluationError;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub(crate) fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            '^' => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }
}

/// The whitelisted single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl Func {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Natural log and square root reject arguments outside their real domain.
    fn apply(self, arg: f64) -> Result<f64, EvaluationError> {
        let value = match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
            Func::Tan => arg.tan(),
            Func::Exp => arg.exp(),
            Func::Log if arg <= 0.0 => {
                return Err(EvaluationError::Domain { function: self.name(), arg })
            }
            Func::Log => arg.ln(),
            Func::Sqrt if arg < 0.0 => {
                return Err(EvaluationError::Domain { function: self.name(), arg })
            }
            Func::Sqrt => arg.sqrt(),
            Func::Abs => arg.abs(),
        };
        Ok(value)
    }
}

/// Expression tree over one free variable.
///
/// Named constants are folded into [`Expr::Number`] while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable,
    Neg(Box<Expr>),
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { func: Func, arg: Box<Expr> },
}

impl Expr {
    pub(crate) fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    /// Evaluates the tree with the free variable bound to `x`.
    ///
    /// Every node must produce a finite value; the first node that doesn't
    /// aborts evaluation.
    pub fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Variable => x,
            Expr::Neg(operand) => -operand.eval(x)?,
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(x)?;
                let r = rhs.eval(x)?;
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div if r == 0.0 => return Err(EvaluationError::DivisionByZero { x }),
                    BinOp::Div => l / r,
                    BinOp::Pow => {
                        let v = l.powf(r);
                        // negative base with a fractional exponent
                        if v.is_nan() {
                            return Err(EvaluationError::Domain { function: "pow", arg: l });
                        }
                        v
                    }
                }
            }
            Expr::Call { func, arg } => func.apply(arg.eval(x)?)?,
        };

        if !value.is_finite() {
            return Err(EvaluationError::NonFinite { x, value });
        }
        Ok(value)
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable => 1,
            Expr::Neg(operand) => 1 + operand.size(),
            Expr::Binary { lhs, rhs, .. } => 1 + lhs.size() + rhs.size(),
            Expr::Call { arg, .. } => 1 + arg.size(),
        }
    }
}

// Fully parenthesized infix, with the free variable printed as `x`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Variable => write!(f, "x"),
            Expr::Neg(operand) => write!(f, "-({operand})"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Call { func, arg } => write!(f, "{}({arg})", func.name()),
        }
    }
}
