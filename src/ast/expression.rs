use std::fmt;

use super::{
    BooleanLiteral, Call, FunctionLiteral, Identifier, If, Infix, IntegerLiteral, Prefix,
    StringLiteral,
};

/// The closed set of expression node variants (spec §3.2).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    Prefix(Prefix),
    Infix(Infix),
    If(If),
    FunctionLiteral(FunctionLiteral),
    Call(Call),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(node) => write!(f, "{node}"),
            Expression::IntegerLiteral(node) => write!(f, "{node}"),
            Expression::StringLiteral(node) => write!(f, "{node}"),
            Expression::BooleanLiteral(node) => write!(f, "{node}"),
            Expression::Prefix(node) => write!(f, "{node}"),
            Expression::Infix(node) => write!(f, "{node}"),
            Expression::If(node) => write!(f, "{node}"),
            Expression::FunctionLiteral(node) => write!(f, "{node}"),
            Expression::Call(node) => write!(f, "{node}"),
        }
    }
}
