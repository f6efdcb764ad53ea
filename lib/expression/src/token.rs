use nom::IResult;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::map,
};

use crate::EvalError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// A token and the byte offset it starts at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tokens {
    pub lexemes: Vec<Lexeme>,
    /// Byte length of the input, reported as the position of end-of-input
    pub end: usize,
}

fn blank(i: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(i)
}

fn symbol(i: &str) -> IResult<&str, Token> {
    alt((
        map(char('+'), |_| Token::Plus),
        map(char('-'), |_| Token::Minus),
        map(char('*'), |_| Token::Star),
        map(char('/'), |_| Token::Slash),
        map(char('('), |_| Token::LParen),
        map(char(')'), |_| Token::RParen),
    ))(i)
}

fn digits(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit() || c == '.')(i)
}

/// Converts a run of digits and points starting at `offset`
fn number(run: &str, offset: usize) -> Result<f64, EvalError> {
    if let Some((second, _)) = run.match_indices('.').nth(1) {
        return Err(EvalError::UnexpectedToken(offset + second));
    }
    run.parse().map_err(|_| EvalError::UnexpectedToken(offset))
}

pub fn tokenize(input: &str) -> Result<Tokens, EvalError> {
    let mut lexemes = Vec::new();
    let mut rest = input;

    loop {
        if let Ok((i, _)) = blank(rest) {
            rest = i;
        }
        if rest.is_empty() {
            break;
        }

        let offset = input.len() - rest.len();
        if let Ok((i, token)) = symbol(rest) {
            lexemes.push(Lexeme { token, offset });
            rest = i;
            continue;
        }

        match digits(rest) {
            Ok((i, run)) => {
                let token = Token::Number(number(run, offset)?);
                lexemes.push(Lexeme { token, offset });
                rest = i;
            }
            Err(_) => return Err(EvalError::UnexpectedToken(offset)),
        }
    }

    Ok(Tokens {
        lexemes,
        end: input.len(),
    })
}
