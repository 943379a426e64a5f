//! LPP: a tree-walking interpreter for a small expression-oriented language
//! with Spanish-language keywords.
//!
//! The public surface mirrors the three-stage pipeline: [`lex`] turns a
//! source string into a pull-based token stream, [`parse`] drives that
//! stream through the Pratt parser into an AST plus any parse errors, and
//! [`evaluate`] walks the AST against an [`Environment`].

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use evaluator::{evaluate, Environment, Value};
pub use lexer::Lexer;
pub use parser::Parser;

/// Lexes `source` into a fresh [`Lexer`] ready to be pulled from or handed
/// to [`parse`].
pub fn lex(source: &str) -> Lexer {
    Lexer::new(source)
}

/// Parses the token stream produced by `lexer` into a (possibly partial)
/// [`ast::Program`] plus every parse error accumulated along the way.
pub fn parse(lexer: Lexer) -> (ast::Program, Vec<String>) {
    Parser::new(lexer).parse_program()
}
