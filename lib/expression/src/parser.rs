//! Precedence climbing over a token sequence:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := ['+' | '-'] NUMBER | '(' expression ')'
//! ```
//!
//! A sign is only accepted in front of a number token, making it part of
//! the literal. It cannot negate a group or another sign.
//!
//! Open groups are kept on an explicit stack, so neither the length of a
//! chain nor the nesting depth grows the call stack.

use std::mem;

use log::debug;

use crate::expr::{Expr, Operation};
use crate::token::{Lexeme, Token, Tokens};
use crate::EvalError;

/// Partially built `expression` of one nesting level
#[derive(Default)]
struct Frame {
    /// Left operand and operator of a pending `+` or `-`
    sum: Option<(Expr, Operation)>,
    /// Left operand and operator of a pending `*` or `/`
    product: Option<(Expr, Operation)>,
}

impl Frame {
    /// Folds a completed factor into the pending product, yielding a term
    fn factor(&mut self, factor: Expr) -> Expr {
        match self.product.take() {
            Some((left, op)) => Expr::binary(op, left, factor),
            None => factor,
        }
    }

    /// Folds a completed term into the pending sum
    fn term(&mut self, term: Expr) -> Expr {
        match self.sum.take() {
            Some((left, op)) => Expr::binary(op, left, term),
            None => term,
        }
    }

    fn operator(&mut self, op: Operation, term: Expr) {
        match op {
            Operation::Mul | Operation::Div => self.product = Some((term, op)),
            Operation::Add | Operation::Sub => {
                let sum = self.term(term);
                self.sum = Some((sum, op));
            }
        }
    }

    fn finish(mut self, term: Expr) -> Expr {
        self.term(term)
    }
}

fn operation(token: Token) -> Option<Operation> {
    match token {
        Token::Plus => Some(Operation::Add),
        Token::Minus => Some(Operation::Sub),
        Token::Star => Some(Operation::Mul),
        Token::Slash => Some(Operation::Div),
        _ => None,
    }
}

struct Parser<'a> {
    lexemes: &'a [Lexeme],
    next: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Lexeme> {
        self.lexemes.get(self.next).copied()
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.peek();
        if lexeme.is_some() {
            self.next += 1;
        }
        lexeme
    }

    /// Reads a factor, or returns `None` after consuming an opening paren
    fn factor(&mut self, depth: usize) -> Result<Option<Expr>, EvalError> {
        let lexeme = match self.advance() {
            Some(lexeme) => lexeme,
            None => return Err(EvalError::UnexpectedToken(self.end)),
        };

        match lexeme.token {
            Token::Number(v) => Ok(Some(Expr::Literal(v))),
            Token::Plus => self.signed(1.).map(Some),
            Token::Minus => self.signed(-1.).map(Some),
            Token::LParen => Ok(None),
            Token::RParen if depth == 0 => Err(EvalError::UnbalancedParens),
            _ => Err(EvalError::UnexpectedToken(lexeme.offset)),
        }
    }

    fn signed(&mut self, sign: f64) -> Result<Expr, EvalError> {
        match self.advance() {
            Some(Lexeme {
                token: Token::Number(v),
                ..
            }) => Ok(Expr::Literal(sign * v)),
            Some(lexeme) => Err(EvalError::UnexpectedToken(lexeme.offset)),
            None => Err(EvalError::UnexpectedToken(self.end)),
        }
    }

    fn expression(&mut self) -> Result<Expr, EvalError> {
        let mut enclosing: Vec<Frame> = Vec::new();
        let mut frame = Frame::default();

        loop {
            let factor = match self.factor(enclosing.len())? {
                Some(factor) => factor,
                None => {
                    enclosing.push(mem::take(&mut frame));
                    continue;
                }
            };
            let mut term = frame.factor(factor);

            // Close groups until an operator continues the expression
            loop {
                let lexeme = match self.peek() {
                    Some(lexeme) => lexeme,
                    None if enclosing.is_empty() => return Ok(frame.finish(term)),
                    None => return Err(EvalError::UnbalancedParens),
                };

                if let Some(op) = operation(lexeme.token) {
                    self.next += 1;
                    frame.operator(op, term);
                    break;
                }

                match (lexeme.token, enclosing.pop()) {
                    (Token::RParen, Some(outer)) => {
                        self.next += 1;
                        let group = mem::replace(&mut frame, outer).finish(term);
                        term = frame.factor(group);
                    }
                    (Token::RParen, None) => return Err(EvalError::UnbalancedParens),
                    (_, Some(_)) => return Err(EvalError::UnexpectedToken(lexeme.offset)),
                    (_, None) => return Err(EvalError::TrailingInput),
                }
            }
        }
    }
}

pub fn parse(tokens: &Tokens) -> Result<Expr, EvalError> {
    if tokens.lexemes.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let mut parser = Parser {
        lexemes: &tokens.lexemes,
        next: 0,
        end: tokens.end,
    };

    let expr = parser.expression()?;
    debug!("Parsed {} tokens", tokens.lexemes.len());
    Ok(expr)
}
