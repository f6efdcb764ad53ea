use std::fmt;
use std::mem;

use strum_macros::Display;

/// The only operations an expression tree can apply
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum Operation {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    BinaryOp(Operation, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn binary(op: Operation, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp(op, Box::new(left), Box::new(right))
    }
}

enum Piece<'a> {
    Node(&'a Expr),
    Op(Operation),
    Close,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Node(Expr::Literal(v)) => write!(f, "{}", v)?,
                Piece::Node(Expr::BinaryOp(op, l, r)) => {
                    f.write_str("(")?;
                    pieces.push(Piece::Close);
                    pieces.push(Piece::Node(r));
                    pieces.push(Piece::Op(*op));
                    pieces.push(Piece::Node(l));
                }
                Piece::Op(op) => write!(f, " {} ", op)?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

/// Moves the children of `expr` onto `pending`, leaving literals behind
fn unlink(expr: &mut Expr, pending: &mut Vec<Expr>) {
    if let Expr::BinaryOp(_, l, r) = expr {
        pending.push(mem::replace(&mut **l, Expr::Literal(0.)));
        pending.push(mem::replace(&mut **r, Expr::Literal(0.)));
    }
}

// Trees can be as deep as the input is long, so subtrees are torn down from
// a heap stack rather than by recursive drops
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        unlink(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            unlink(&mut expr, &mut pending);
        }
    }
}
