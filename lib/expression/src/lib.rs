use log::debug;

pub use error::EvalError;
pub use expr::{Expr, Operation};
pub use format::format_result;
pub use parser::parse;
pub use token::{tokenize, Lexeme, Token, Tokens};

mod error;
mod eval;
mod expr;
mod format;
mod parser;
mod token;

/// Evaluates an arithmetic expression over `+ - * /` and parentheses,
/// returning the formatted result
pub fn evaluate(expression: &str) -> Result<String, EvalError> {
    let tokens = tokenize(expression)?;
    let expr = parse(&tokens)?;
    let value = expr.evaluate()?;
    debug!("{} = {}", expr, value);
    Ok(format_result(value))
}
