use std::fmt;

use super::{Block, ExpressionStatement, LetStatement, ReturnStatement};

/// The closed set of statement node variants (spec §3.2).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(Block),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(node) => write!(f, "{node}"),
            Statement::Return(node) => write!(f, "{node}"),
            Statement::Expression(node) => write!(f, "{node}"),
            Statement::Block(node) => write!(f, "{node}"),
        }
    }
}
