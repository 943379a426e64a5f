//! Character stream → token stream.
//!
//! The lexer is pull-based: each call to [`Lexer::next_token`] reads exactly
//! one token from the source, advancing an internal cursor. It never fails;
//! unrecognized bytes become [`TokenKind::Illegal`] tokens (see spec §4.1).

mod token;
mod token_kind;

pub use token::{Position, Token};
pub use token_kind::TokenKind;

use once_cell::sync::Lazy;
use std::collections::HashMap;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("variable", TokenKind::Let);
    m.insert("procedimiento", TokenKind::Function);
    m.insert("si", TokenKind::If);
    m.insert("si_no", TokenKind::Else);
    m.insert("regresa", TokenKind::Return);
    m.insert("verdadero", TokenKind::True);
    m.insert("falso", TokenKind::False);
    m
});

fn lookup_keyword(literal: &str) -> Option<TokenKind> {
    KEYWORDS.get(literal).copied()
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || ch == '_'
        || matches!(ch, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'ñ' | 'Ñ')
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Lexes a source string, pulling characters from a `Vec<char>` so the
/// cursor advances by code point rather than by byte (spec §4.1).
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    ch: Option<char>,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        log::debug!("lexing {} bytes of source", source.len());

        let mut lexer = Self {
            input: source.chars().collect(),
            position: 0,
            read_position: 0,
            ch: None,
            line: 1,
            col: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        if let Some(prev) = self.ch {
            if prev == '\n' {
                self.line += 1;
                self.col = 0;
            }
        }

        self.ch = self.input.get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
        self.col += 1;
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ') | Some('\t') | Some('\n') | Some('\r')) {
            self.read_char();
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while let Some(ch) = self.ch {
            if !pred(ch) {
                break;
            }
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    fn read_string(&mut self) -> String {
        // current char is the opening '"'; consume up to (not including) the closing '"'.
        self.read_char();
        let start = self.position;
        while let Some(ch) = self.ch {
            if ch == '"' {
                break;
            }
            self.read_char();
        }
        let literal: String = self.input[start..self.position].iter().collect();
        // consume the closing quote.
        self.read_char();
        literal
    }

    /// Reads and returns the next token, advancing the cursor. Beyond the
    /// end of input, returns `Token(EOF, "")` indefinitely.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let position = (self.line, self.col);
        log::debug!("next_token at {position:?}, ch = {:?}", self.ch);

        let Some(ch) = self.ch else {
            return Token::new(TokenKind::Eof, "", position);
        };

        // Two-character operators are tried before single-character ones.
        if ch == '=' && self.peek_char() == Some('=') {
            self.read_char();
            self.read_char();
            return Token::new(TokenKind::Eq, "==", position);
        }
        if ch == '!' && self.peek_char() == Some('=') {
            self.read_char();
            self.read_char();
            return Token::new(TokenKind::NotEq, "!=", position);
        }

        if let Some(kind) = single_char_kind(ch) {
            self.read_char();
            return Token::new(kind, ch.to_string(), position);
        }

        if ch == '"' {
            let literal = self.read_string();
            return Token::new(TokenKind::StringLit, literal, position);
        }

        if is_letter(ch) {
            let literal = self.read_while(|c| is_letter(c) || is_digit(c));
            let kind = lookup_keyword(&literal).unwrap_or(TokenKind::Ident);
            return Token::new(kind, literal, position);
        }

        if is_digit(ch) {
            let literal = self.read_while(is_digit);
            return Token::new(TokenKind::Int, literal, position);
        }

        self.read_char();
        Token::new(TokenKind::Illegal, ch.to_string(), position)
    }
}

fn single_char_kind(ch: char) -> Option<TokenKind> {
    Some(match ch {
        '=' => TokenKind::Assign,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Asterisk,
        '/' => TokenKind::Slash,
        '!' => TokenKind::Bang,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut kinds = vec![];
        loop {
            let token = lexer.next_token();
            let kind = token.kind;
            kinds.push(kind);
            if kind == TokenKind::Eof {
                break;
            }
        }
        kinds
    }

    #[test]
    fn single_char_operators() {
        for (src, expected) in [
            ("=", TokenKind::Assign),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Asterisk),
            ("/", TokenKind::Slash),
            ("!", TokenKind::Bang),
            ("<", TokenKind::Lt),
            (">", TokenKind::Gt),
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            (",", TokenKind::Comma),
            (";", TokenKind::Semicolon),
        ] {
            assert_eq!(kinds(src), vec![expected, TokenKind::Eof]);
        }
    }

    #[test]
    fn two_char_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("10 == 10; 10 != 9;"),
            vec![
                Int, Eq, Int, Semicolon, Int, NotEq, Int, Semicolon, Eof
            ]
        );
    }

    #[test]
    fn keywords_resolve_over_identifiers() {
        assert_eq!(kinds("procedimiento"), vec![TokenKind::Function, TokenKind::Eof]);
        assert_eq!(kinds("si_no"), vec![TokenKind::Else, TokenKind::Eof]);
        assert_eq!(kinds("foo"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn string_literal_keeps_interior_spaces() {
        let mut lexer = Lexer::new(r#""foo bar""#);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::StringLit);
        assert_eq!(token.literal, "foo bar");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn unicode_identifier() {
        assert_eq!(kinds("variación"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn unrecognized_byte_is_illegal() {
        assert_eq!(kinds("@"), vec![TokenKind::Illegal, TokenKind::Eof]);
    }

    #[test]
    fn full_program_token_stream() {
        let source = "variable cinco = 5;\nvariable diez = 10;\n\nvariable suma = procedimiento(x, y) {\n  x + y;\n};\n\nvariable resultado = suma(cinco, diez);\n";
        let mut lexer = Lexer::new(source);
        let mut saw_function = false;
        let mut saw_let = false;
        loop {
            let token = lexer.next_token();
            match token.kind {
                TokenKind::Function => saw_function = true,
                TokenKind::Let => saw_let = true,
                TokenKind::Eof => break,
                _ => {}
            }
        }
        assert!(saw_function);
        assert!(saw_let);
    }
}
