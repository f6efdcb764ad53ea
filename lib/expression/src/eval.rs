use log::debug;

use crate::expr::{Expr, Operation};
use crate::EvalError;

impl Operation {
    pub fn apply(self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Operation::Add => Ok(left + right),
            Operation::Sub => Ok(left - right),
            Operation::Mul => Ok(left * right),
            // Exact zero only, no epsilon
            Operation::Div if right == 0.0 => Err(EvalError::DivisionByZero),
            Operation::Div => Ok(left / right),
        }
    }
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow)
    }
}

enum Step<'a> {
    Visit(&'a Expr),
    Apply(Operation),
}

impl Expr {
    /// Evaluates the tree bottom-up, using a heap stack so that deep trees
    /// cannot exhaust the call stack.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` when a divisor evaluates to exactly zero
    /// - `Overflow` when any node produces an infinite or NaN value
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Expr::Literal(v)) => values.push(finite(*v)?),
                Step::Visit(Expr::BinaryOp(op, l, r)) => {
                    steps.push(Step::Apply(*op));
                    steps.push(Step::Visit(r));
                    steps.push(Step::Visit(l));
                }
                Step::Apply(op) => {
                    let (left, right) = match (values.pop(), values.pop()) {
                        (Some(right), Some(left)) => (left, right),
                        _ => unreachable!("operands are evaluated before their operator"),
                    };
                    let value = op.apply(left, right)?;
                    if !value.is_finite() {
                        debug!("Non-finite value from {} {} {}", left, op, right);
                    }
                    values.push(finite(value)?);
                }
            }
        }

        match values.pop() {
            Some(value) => Ok(value),
            None => unreachable!("every tree yields a value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, tokenize};

    fn eval(i: &str) -> Result<f64, EvalError> {
        parse(&tokenize(i)?)?.evaluate()
    }

    #[test]
    fn test_eval() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(eval("34/2")?, 17.);
        assert_eq!(eval("34 +6/ 2")?, 37.);
        assert_eq!(eval("(34 +6)/ 2")?, 20.);
        assert_eq!(eval("332+23.0- 15")?, 340.);
        assert_eq!(eval("3 * 4 / (6+54.) * 5 - 1")?, 0.);
        assert_eq!(eval("-3+4")?, 1.);
        Ok(())
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("5/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("5/-0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0/0.0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_tiny_divisor() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(eval("1/0.0001")?, 1. / 0.0001);
        Ok(())
    }

    #[test]
    fn test_overflow() {
        let huge = "9".repeat(400);
        assert_eq!(eval(&huge), Err(EvalError::Overflow));

        let product = format!("{0}*{0}", "9".repeat(200));
        assert_eq!(eval(&product), Err(EvalError::Overflow));
    }

    #[test]
    fn test_non_commutative_order() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(eval("10-2-3")?, 5.);
        assert_eq!(eval("64/4/2")?, 8.);
        assert_eq!(eval("2-(3-(4-5))")?, -2.);
        Ok(())
    }

    #[test]
    fn test_long_chain() -> Result<(), Box<dyn std::error::Error>> {
        let chain = vec!["1"; 200_000].join("+");
        assert_eq!(eval(&chain)?, 200_000.);

        let mut divisions = vec!["1"; 16_384].join("/");
        divisions.push_str("/0");
        assert_eq!(eval(&divisions), Err(EvalError::DivisionByZero));
        Ok(())
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operation::Add.apply(2., 3.), Ok(5.));
        assert_eq!(Operation::Sub.apply(2., 3.), Ok(-1.));
        assert_eq!(Operation::Mul.apply(2., 3.), Ok(6.));
        assert_eq!(Operation::Div.apply(3., 2.), Ok(1.5));
        assert_eq!(Operation::Div.apply(3., 0.), Err(EvalError::DivisionByZero));
    }
}
