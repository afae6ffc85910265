//! Precedence-climbing parser for the expression language.
//!
//! Operator precedence (highest to lowest):
//! - Function calls and parentheses
//! - Power: `^` / `**` (right associative, binds tighter than a leading minus)
//! - Unary `+` / `-`
//! - Multiplication/Division/Remainder: `*`, `/`, `%`
//! - Addition/Subtraction: `+`, `-`

use super::EvalError;
use super::ast::{BinOp, Expr, Function, lookup_constant};
use super::token::{Token, TokenKind};

/// Maximum nesting of parentheses, calls and unary operators.
pub const MAX_DEPTH: usize = 64;

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses the full token stream; trailing tokens are an error.
    pub(crate) fn parse(mut self) -> Result<Expr, EvalError> {
        if matches!(self.peek().kind, TokenKind::End) {
            return Err(EvalError::Empty);
        }
        let expr = self.parse_expr(0)?;
        match self.peek() {
            Token {
                kind: TokenKind::End,
                ..
            } => Ok(expr),
            other => Err(unexpected(other)),
        }
    }

    fn peek(&self) -> &Token {
        // `tokenize` always terminates the stream with `End`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_expr(&mut self, min_prec: u8) -> Result<Expr, EvalError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };

            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();

            let right = self.parse_expr(prec + 1)?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        match self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                self.enter()?;
                let operand = self.parse_unary()?;
                self.leave();
                Ok(Expr::Neg(Box::new(operand)))
            }
            TokenKind::Plus => {
                self.advance();
                self.enter()?;
                let operand = self.parse_unary()?;
                self.leave();
                Ok(operand)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if !matches!(self.peek().kind, TokenKind::Pow) {
            return Ok(base);
        }
        self.advance();
        self.enter()?;
        // Right operand goes through `parse_unary` so `2^-1` and `2^3^2` work.
        let exponent = self.parse_unary()?;
        self.leave();
        Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)))
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Num(value) => Ok(Expr::Num(value)),
            TokenKind::Ident(name) => {
                if matches!(self.peek().kind, TokenKind::LParen) {
                    self.advance();
                    self.parse_call(&name)
                } else {
                    resolve_identifier(&name)
                }
            }
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.parse_expr(0)?;
                self.leave();
                self.expect_rparen()?;
                Ok(inner)
            }
            _ => Err(unexpected(&token)),
        }
    }

    fn parse_call(&mut self, name: &str) -> Result<Expr, EvalError> {
        let function =
            Function::lookup(name).ok_or_else(|| EvalError::UnknownFunction(name.to_owned()))?;

        self.enter()?;
        let mut args = Vec::new();
        if !matches!(self.peek().kind, TokenKind::RParen) {
            loop {
                args.push(self.parse_expr(0)?);
                if matches!(self.peek().kind, TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.leave();
        self.expect_rparen()?;

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(EvalError::Arity {
                function: function.name(),
                expected: arity.describe(),
                found: args.len(),
            });
        }
        Ok(Expr::Call(function, args))
    }

    fn expect_rparen(&mut self) -> Result<(), EvalError> {
        let token = self.advance();
        if matches!(token.kind, TokenKind::RParen) {
            Ok(())
        } else {
            Err(unexpected(&token))
        }
    }
}

fn resolve_identifier(name: &str) -> Result<Expr, EvalError> {
    if name == "x" {
        return Ok(Expr::Var);
    }
    lookup_constant(name)
        .map(Expr::Num)
        .ok_or_else(|| EvalError::UnknownIdentifier(name.to_owned()))
}

fn unexpected(token: &Token) -> EvalError {
    EvalError::UnexpectedToken {
        found: token.kind.describe(),
        offset: token.offset,
    }
}
