//! Boundary between the web layer and the expression pipeline.
//!
//! Every failure is turned into a [`Rejection`] carrying a user-facing
//! message; nothing from the pipeline reaches the caller unmapped.

use std::borrow::Cow;
use std::panic::{self, UnwindSafe};

use log::{debug, error};

use expression::EvalError;
use telemetry::{IsErr, Measure};

use crate::config::CalculatorConfig;

lazy_static! {
    static ref EVALUATE_MEASURE: Measure = Measure::new("adapter", "evaluate");
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    Empty,
    TooLong { limit: usize },
    Invalid(EvalError),
    Crashed,
}

impl Rejection {
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Rejection::Empty | Rejection::Invalid(EvalError::EmptyExpression) => {
                Cow::Borrowed("Please enter an expression")
            }
            Rejection::TooLong { limit } => Cow::Owned(format!(
                "Expression is too long (at most {} characters)",
                limit
            )),
            Rejection::Invalid(EvalError::UnexpectedToken(_))
            | Rejection::Invalid(EvalError::UnbalancedParens)
            | Rejection::Invalid(EvalError::TrailingInput) => {
                Cow::Borrowed("Expression is not well-formed")
            }
            Rejection::Invalid(EvalError::DivisionByZero) => {
                Cow::Borrowed("Division by zero is not allowed")
            }
            Rejection::Invalid(EvalError::Overflow) | Rejection::Crashed => {
                Cow::Borrowed("Expression could not be evaluated")
            }
        }
    }
}

impl IsErr for Rejection {
    fn is_err(&self) -> bool {
        matches!(self, Rejection::Crashed)
    }
}

/// Runs `f`, converting a panic into `Rejection::Crashed`
fn guard<F>(input: &str, f: F) -> Result<String, Rejection>
where
    F: FnOnce() -> Result<String, EvalError> + UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => {
            debug!("Rejected \"{}\": {}", input, e);
            Err(Rejection::Invalid(e))
        }
        Err(_) => {
            error!("Evaluation of \"{}\" panicked", input);
            Err(Rejection::Crashed)
        }
    }
}

/// Evaluates `raw` after trimming, returning the formatted result
pub fn run(raw: &str, config: &CalculatorConfig) -> Result<String, Rejection> {
    let input = raw.trim();

    EVALUATE_MEASURE.stats(|| {
        if input.is_empty() {
            return Err(Rejection::Empty);
        }
        if input.chars().count() > config.max_length {
            return Err(Rejection::TooLong {
                limit: config.max_length,
            });
        }
        guard(input, || expression::evaluate(input))
    })
}

/// What the calculator page shows after a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub expression: String,
    pub result: Option<String>,
    pub message: Option<Cow<'static, str>>,
}

impl DisplayState {
    pub fn submit(raw: &str, config: &CalculatorConfig) -> DisplayState {
        match run(raw, config) {
            Ok(result) => DisplayState {
                expression: raw.to_string(),
                result: Some(result),
                message: None,
            },
            Err(rejection) => DisplayState {
                expression: raw.to_string(),
                result: None,
                message: Some(rejection.message()),
            },
        }
    }
}
