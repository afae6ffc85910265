//! Sandboxed arithmetic expressions over a single variable `x`.
//!
//! Source text is tokenized and parsed into a small syntax tree that can only
//! reference literals, `x`, a handful of named constants and an allow-list of
//! numeric functions. Evaluation walks that tree; there is no access to any
//! outer scope and no construct that loops or recurses at runtime, so the cost
//! of one evaluation is linear in the size of the (length-limited) source.

mod ast;
mod parser;
mod token;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use ast::Expr;
use parser::Parser;

pub use parser::MAX_DEPTH;

/// Maximum accepted source length in bytes.
pub const MAX_SOURCE_LEN: usize = 1024;

/// Any failure to turn source text plus `x` into a finite number.
///
/// Parse failures, unsupported names and non-finite results all share this
/// type; samplers treat every variant the same way and skip the sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("expression is {len} bytes long, limit is {limit}")]
    SourceTooLong { len: usize, limit: usize },

    #[error("expression nesting exceeds depth {limit}")]
    TooDeep { limit: usize },

    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("function `{function}` expects {expected} argument(s), got {found}")]
    Arity {
        function: &'static str,
        expected: String,
        found: usize,
    },

    #[error("expression produced a non-finite value at x={x}")]
    NonFinite { x: f64 },
}

impl EvalError {
    /// Returns `true` for errors raised while compiling, as opposed to
    /// evaluating at a particular `x`.
    #[must_use]
    pub fn is_compile_error(&self) -> bool {
        !matches!(self, Self::NonFinite { .. })
    }
}

/// Compiled expression, reusable across any number of evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    pub fn compile(source: &str) -> Result<Self, EvalError> {
        if source.len() > MAX_SOURCE_LEN {
            return Err(EvalError::SourceTooLong {
                len: source.len(),
                limit: MAX_SOURCE_LEN,
            });
        }
        let tokens = token::tokenize(source)?;
        let root = Parser::new(tokens).parse()?;
        Ok(Self {
            source: source.to_owned(),
            root,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates at `x`, rejecting NaN and infinite results.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = self.root.eval(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite { x })
        }
    }
}

impl FromStr for Expression {
    type Err = EvalError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::compile(source)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One-shot compile and evaluate.
///
/// Prefer `Expression::compile` once plus `Expression::eval` per sample when
/// evaluating the same source repeatedly.
pub fn evaluate(source: &str, x: f64) -> Result<f64, EvalError> {
    Expression::compile(source)?.eval(x)
}
