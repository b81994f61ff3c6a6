//! Shunting-yard parser building an [`Expr`] tree.
//!
//! Operands go to an output stack of subtrees and operators wait on an
//! operator stack until precedence lets them reduce. An `expect_operand` flag
//! rejects adjacent operands and dangling operators as soon as they appear.

use std::f64::consts;
use std::str::FromStr;

use super::ast::{BinOp, Expr, Func};
use super::errors::ExpressionError;
use super::tokenizer::{MathToken, MathTokenizer};

/// Named constants accepted in expressions.
pub const CONSTANTS: [(&str, f64); 2] = [("pi", consts::PI), ("e", consts::E)];

#[derive(PartialEq, Debug)]
enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    OParen { pos: usize },
    Call { func: Func, pos: usize },
    Neg,
    Plus,
    Bin(BinOp),
}

fn precedence(p: &Pending) -> (usize, Assoc) {
    // unary minus binds looser than '^' so -x^2 == -(x^2) and 2^-1 still works
    match p {
        Pending::OParen { .. } | Pending::Call { .. } => (1, Assoc::Left), // keep at bottom
        Pending::Bin(BinOp::Add) | Pending::Bin(BinOp::Sub) => (2, Assoc::Left),
        Pending::Bin(BinOp::Mul) | Pending::Bin(BinOp::Div) => (3, Assoc::Left),
        Pending::Neg | Pending::Plus => (4, Assoc::Right),
        Pending::Bin(BinOp::Pow) => (5, Assoc::Right),
    }
}

/// Deepest tree the parser builds. Evaluating, printing and dropping an
/// [`Expr`] each recurse once per level, so input nesting past this is
/// rejected rather than left to exhaust the stack later.
pub const MAX_DEPTH: usize = 256;

/// A finished subtree and its depth (leaves are 1).
type Operand = (Expr, usize);

fn pop(out: &mut Vec<Operand>) -> Result<Operand, ExpressionError> {
    out.pop().ok_or(ExpressionError::UnexpectedEnd)
}

fn reduce(out: &mut Vec<Operand>, op: Pending, at: usize) -> Result<(), ExpressionError> {
    let (expr, depth) = match op {
        Pending::Bin(op) => {
            let (rhs, rhs_depth) = pop(out)?;
            let (lhs, lhs_depth) = pop(out)?;
            (Expr::binary(op, lhs, rhs), lhs_depth.max(rhs_depth) + 1)
        }
        Pending::Neg => {
            let (operand, depth) = pop(out)?;
            (Expr::Neg(Box::new(operand)), depth + 1)
        }
        Pending::Plus => {
            if out.is_empty() {
                return Err(ExpressionError::UnexpectedEnd);
            }
            return Ok(());
        }
        Pending::Call { func, .. } => {
            let (arg, depth) = pop(out)?;
            (Expr::Call { func, arg: Box::new(arg) }, depth + 1)
        }
        Pending::OParen { pos } => return Err(ExpressionError::UnbalancedParens { pos }),
    };
    if depth > MAX_DEPTH {
        return Err(ExpressionError::TooDeep { pos: at });
    }
    out.push((expr, depth));
    Ok(())
}

fn resolve_identifier(name: &str, variable: &str, pos: usize) -> Result<Expr, ExpressionError> {
    if name == variable {
        return Ok(Expr::Variable);
    }
    CONSTANTS
        .iter()
        .find(|(constant, _)| *constant == name)
        .map(|&(_, value)| Expr::Number(value))
        .ok_or_else(|| ExpressionError::UnknownIdentifier { name: name.to_string(), pos })
}

/// The function owning the innermost open parenthesis, if any.
fn enclosing_call(stack: &[Pending]) -> Option<Func> {
    let paren = stack.iter().rposition(|p| matches!(p, Pending::OParen { .. }))?;
    match stack.get(paren.checked_sub(1)?) {
        Some(Pending::Call { func, .. }) => Some(*func),
        _ => None,
    }
}

/// Parses `text` into an expression tree over `variable`.
///
/// # Errors
/// - [`ExpressionError::Empty`]             : no tokens
/// - [`ExpressionError::UnknownIdentifier`] : name outside `variable`, constants, functions
/// - [`ExpressionError::UnexpectedToken`]   : disallowed character or misplaced token
/// - [`ExpressionError::BadNumber`]         : literal not representable as `f64`
/// - [`ExpressionError::UnbalancedParens`]  : unmatched `(` or `)`
/// - [`ExpressionError::WrongArity`]        : `sin()` or `sin(x, 1)`
/// - [`ExpressionError::UnexpectedEnd`]     : trailing operator
/// - [`ExpressionError::TooDeep`]           : tree deeper than [`MAX_DEPTH`]
pub fn parse_expression(text: &str, variable: &str) -> Result<Expr, ExpressionError> {
    let mut out: Vec<Operand> = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();
    let mut expect_operand = true;
    let mut seen_token = false;

    for (pos, token) in MathTokenizer::new(text) {
        seen_token = true;
        let unexpected = |token: &MathToken| ExpressionError::UnexpectedToken {
            token: token.to_string(),
            pos,
        };

        match &token {
            MathToken::Number(n) => {
                if !expect_operand {
                    return Err(unexpected(&token));
                }
                out.push((Expr::Number(*n), 1));
                expect_operand = false;
            }
            MathToken::Variable(name) => {
                let operand = resolve_identifier(name, variable, pos)?;
                if !expect_operand {
                    return Err(unexpected(&token));
                }
                out.push((operand, 1));
                expect_operand = false;
            }
            MathToken::Function(name) => {
                let func = match Func::from_str(name) {
                    Ok(func) => func,
                    Err(_) if resolve_identifier(name, variable, pos).is_ok() => {
                        return Err(unexpected(&token))
                    }
                    Err(_) => {
                        return Err(ExpressionError::UnknownIdentifier { name: name.clone(), pos })
                    }
                };
                if !expect_operand {
                    return Err(unexpected(&token));
                }
                stack.push(Pending::Call { func, pos });
            }
            MathToken::OParen => {
                if !expect_operand {
                    return Err(unexpected(&token));
                }
                stack.push(Pending::OParen { pos });
            }
            MathToken::CParen => {
                if expect_operand {
                    // `()`, `sin()` or `(2 +)`
                    return match (stack.last(), enclosing_call(&stack)) {
                        (Some(Pending::OParen { .. }), Some(func)) => {
                            let call_pos = stack
                                .iter()
                                .rev()
                                .find_map(|p| match p {
                                    Pending::Call { pos, .. } => Some(*pos),
                                    _ => None,
                                })
                                .unwrap_or(pos);
                            Err(ExpressionError::WrongArity { name: func.name(), pos: call_pos })
                        }
                        _ => Err(unexpected(&token)),
                    };
                }
                loop {
                    match stack.pop() {
                        Some(Pending::OParen { .. }) => break,
                        Some(op) => reduce(&mut out, op, pos)?,
                        None => return Err(ExpressionError::UnbalancedParens { pos }),
                    }
                }
                if let Some(call @ Pending::Call { .. }) = stack.last().copied() {
                    stack.pop();
                    reduce(&mut out, call, pos)?;
                }
                expect_operand = false;
            }
            MathToken::Comma => {
                return match enclosing_call(&stack) {
                    Some(func) => Err(ExpressionError::WrongArity { name: func.name(), pos }),
                    None => Err(unexpected(&token)),
                };
            }
            MathToken::UOp(op) => {
                if !expect_operand {
                    return Err(unexpected(&token));
                }
                stack.push(if *op == '-' { Pending::Neg } else { Pending::Plus });
            }
            MathToken::BOp(symbol) => {
                let op = match BinOp::from_symbol(*symbol) {
                    Some(op) if !expect_operand => Pending::Bin(op),
                    _ => return Err(unexpected(&token)),
                };
                let (prec_rhs, assoc_rhs) = precedence(&op);
                while let Some(top) = stack.last().copied() {
                    if matches!(top, Pending::OParen { .. } | Pending::Call { .. }) {
                        break;
                    }
                    let (prec_lhs, _) = precedence(&top);
                    if prec_lhs > prec_rhs || (prec_lhs == prec_rhs && assoc_rhs == Assoc::Left) {
                        stack.pop();
                        reduce(&mut out, top, pos)?;
                    } else {
                        break;
                    }
                }
                stack.push(op);
                expect_operand = true;
            }
            MathToken::BadNumber(literal) => {
                return Err(ExpressionError::BadNumber { literal: literal.clone(), pos })
            }
            MathToken::Unknown(_) => return Err(unexpected(&token)),
        }
    }

    if !seen_token {
        return Err(ExpressionError::Empty);
    }
    if expect_operand {
        return Err(ExpressionError::UnexpectedEnd);
    }
    while let Some(op) = stack.pop() {
        reduce(&mut out, op, text.len())?;
    }
    match (out.pop(), out.is_empty()) {
        (Some((expr, _)), true) => Ok(expr),
        _ => Err(ExpressionError::UnexpectedEnd),
    }
}
