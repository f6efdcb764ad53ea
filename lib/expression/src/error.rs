use derive_more::Display;

/// Every way an expression can fail to produce a value.
///
/// Offsets are byte offsets into the original input.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[display(fmt = "Unexpected token at offset {}", _0)]
    UnexpectedToken(usize),

    #[display(fmt = "Unbalanced parentheses")]
    UnbalancedParens,

    #[display(fmt = "Empty expression")]
    EmptyExpression,

    #[display(fmt = "Division by zero")]
    DivisionByZero,

    #[display(fmt = "Unexpected input after expression")]
    TrailingInput,

    #[display(fmt = "Result is not a finite number")]
    Overflow,
}

impl std::error::Error for EvalError {}
