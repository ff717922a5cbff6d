use crate::lexer::TokenType;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Additive operators, as used by `expression`.
    pub fn additive(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Plus => Some(BinaryOp::Add),
            TokenType::Minus => Some(BinaryOp::Subtract),
            _ => None,
        }
    }

    /// Multiplicative operators, as used by `term`.
    pub fn multiplicative(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Star => Some(BinaryOp::Multiply),
            TokenType::Slash => Some(BinaryOp::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,
}

/// What the parser does with the pieces of an expression as it recognizes
/// them. The grammar-driving code only talks to this trait, so replacing
/// immediate evaluation (for instance with tree building) leaves the parser
/// untouched.
pub trait Evaluate {
    /// Value of a numeric literal's text.
    fn literal(&mut self, text: &str) -> f64;

    /// Folds `lhs op rhs`.
    fn binary(&mut self, op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalError>;
}

/// Immediate evaluation in `f64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Arithmetic;

impl Evaluate for Arithmetic {
    fn literal(&mut self, text: &str) -> f64 {
        // The lexer only hands over digits with at most one '.'.
        text.parse().unwrap_or(0.0)
    }

    fn binary(&mut self, op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        match op {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Subtract => Ok(lhs - rhs),
            BinaryOp::Multiply => Ok(lhs * rhs),
            BinaryOp::Divide if rhs == 0.0 => Err(EvalError::DivisionByZero),
            BinaryOp::Divide => Ok(lhs / rhs),
        }
    }
}
