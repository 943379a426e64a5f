//! Pratt / precedence-climbing parser.
//!
//! The parser is single-pass with two tokens of lookahead (`current` and
//! `peek`). Errors are accumulated rather than raised; [`Parser::parse_program`]
//! always returns a (possibly partial) [`Program`] alongside whatever errors
//! were collected along the way (spec §4.3).

use crate::ast::{
    Block, BooleanLiteral, Call, Expression, ExpressionStatement, FunctionLiteral, Identifier, If,
    Infix, IntegerLiteral, LetStatement, Prefix, Program, ReturnStatement, Statement,
    StringLiteral,
};
use crate::lexer::{Lexer, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

fn is_infix_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::LParen
    )
}

pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        log::debug!("initializing parser");

        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: vec![],
        }
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.advance();
            true
        } else {
            self.errors.push(format!(
                "Se esperaba que el siguiente token fuera {} pero se obtuvo {}",
                kind, self.peek.kind
            ));
            false
        }
    }

    /// Parses the whole token stream, returning the (possibly partial)
    /// program together with every accumulated error message.
    pub fn parse_program(mut self) -> (Program, Vec<String>) {
        log::debug!("parsing program");

        let mut program = Program::default();

        while self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.advance();
        }

        log::debug!(
            "parsed {} statement(s), {} error(s)",
            program.statements.len(),
            self.errors.len()
        );

        (program, self.errors)
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.current.clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(ExpressionStatement { token, expression })
    }

    fn parse_block_statement(&mut self) -> Block {
        let token = self.current.clone();
        self.advance();

        let mut statements = vec![];
        while self.current.kind != TokenKind::RBrace && self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }

        Block { token, statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Semicolon && precedence < precedence_of(self.peek.kind)
        {
            if !is_infix_operator(self.peek.kind) {
                return Some(left);
            }

            self.advance();
            left = if self.current.kind == TokenKind::LParen {
                self.parse_call_expression(left)?
            } else {
                self.parse_infix_expression(left)?
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(self.parse_identifier()),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::StringLit => Some(self.parse_string_literal()),
            TokenKind::True | TokenKind::False => Some(self.parse_boolean_literal()),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            _ => {
                self.errors.push(format!(
                    "No se ha encontrado una función para parsear {}",
                    self.current.literal
                ));
                None
            }
        }
    }

    fn parse_identifier(&self) -> Expression {
        Expression::Identifier(Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        })
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.current.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral {
                token: self.current.clone(),
                value,
            })),
            Err(_) => {
                self.errors.push(format!(
                    "No se ha podido parsear el valor {} como entero",
                    self.current.literal
                ));
                None
            }
        }
    }

    fn parse_string_literal(&self) -> Expression {
        Expression::StringLiteral(StringLiteral {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        })
    }

    fn parse_boolean_literal(&self) -> Expression {
        Expression::BooleanLiteral(BooleanLiteral {
            token: self.current.clone(),
            value: self.current.kind == TokenKind::True,
        })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let operator = token.literal.clone();
        self.advance();

        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(Prefix {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();

        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let mut alternative = None;
        if self.peek.kind == TokenKind::Else {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            alternative = Some(self.parse_block_statement());
        }

        Some(Expression::If(If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::FunctionLiteral(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut params = vec![];

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(params);
        }

        self.advance();
        params.push(Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        });

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            params.push(Identifier {
                token: self.current.clone(),
                name: self.current.literal.clone(),
            });
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(params)
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let operator = token.literal.clone();
        let precedence = precedence_of(self.current.kind);
        self.advance();

        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call(Call {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut args = vec![];

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(args);
        }

        self.advance();
        args.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Program, Vec<String>) {
        Parser::new(Lexer::new(source)).parse_program()
    }

    #[test]
    fn operator_precedence_round_trips() {
        let cases = [
            ("-a * b;", "((-a) * b)"),
            ("!-a;", "(!(-a))"),
            ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 > 5 == verdadero;", "((3 > 5) == verdadero)"),
            ("1 + (2 + 3);", "(1 + (2 + 3))"),
            (
                "suma(a, b, 1, 2 * 3, 4 + 5, suma(6, 7 * 8));",
                "suma(a, b, 1, (2 * 3), (4 + 5), suma(6, (7 * 8)))",
            ),
        ];

        for (source, expected) in cases {
            let (program, errors) = parse(source);
            assert!(errors.is_empty(), "unexpected errors for {source:?}: {errors:?}");
            assert_eq!(program.to_string(), expected);
        }
    }

    #[test]
    fn malformed_let_produces_one_error() {
        let (_, errors) = parse("variable x 5;");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn function_literal_parses_params_and_body() {
        let (program, errors) = parse("procedimiento(x, y) { x + y }");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 1);

        let Statement::Expression(ExpressionStatement {
            expression: Expression::FunctionLiteral(func),
            ..
        }) = &program.statements[0]
        else {
            panic!("expected a function literal statement, got {:?}", program.statements[0]);
        };

        let params: Vec<String> = func.parameters.iter().map(|p| p.to_string()).collect();
        assert_eq!(params, vec!["x", "y"]);
        assert_eq!(func.body.statements.len(), 1);
        assert_eq!(func.body.statements[0].to_string(), "(x + y)");
    }

    #[test]
    fn let_and_return_fully_parse_their_expression() {
        let (program, errors) = parse("variable x = 5 + 5; regresa 10 * 2;");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[0].to_string(), "variable x = (5 + 5);");
        assert_eq!(program.statements[1].to_string(), "regresa (10 * 2);");
    }

    #[test]
    fn unclosed_group_records_error() {
        let (_, errors) = parse("(1 + 2;");
        assert_eq!(errors.len(), 1);
    }
}
