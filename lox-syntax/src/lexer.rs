use log::{debug, trace};

use crate::{
    error::ScanError,
    reporter::Reporter,
    token::{Literal, Token, TokenKind},
};

/// Single-pass scanner over one source string.
///
/// `start` marks the first byte of the lexeme being recognized and `current` the next unconsumed
/// byte, so `start <= current <= src.len()` holds throughout.
pub struct Lexer<'a> {
    src: &'a str,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Scans the whole source, collecting errors instead of reporting them.
    pub fn scan_tokens(self) -> (Vec<Token>, Vec<ScanError>) {
        let mut errors: Vec<ScanError> = Vec::new();
        let tokens = self.scan_tokens_with(&mut errors);

        (tokens, errors)
    }

    /// Scans the whole source. Every lexical error goes to `reporter` exactly once; the returned
    /// tokens always end with a single `Eof`.
    pub fn scan_tokens_with(mut self, reporter: &mut impl Reporter) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut errors = 0;

        while let Some(c) = self.advance() {
            match self.scan_token(c) {
                Some(Ok(token)) => {
                    trace!("token {token}");
                    tokens.push(token);
                }
                Some(Err(e)) => {
                    debug!("line {}: {e}", e.line());
                    errors += 1;
                    reporter.report(&e);
                }
                None => (),
            };

            self.start = self.current;
            self.start_line = self.line;
        }

        tokens.push(Token::eof(self.line, self.src.len()));
        debug!(
            "scanned {} tokens, {errors} errors, {} lines",
            tokens.len(),
            self.line
        );

        tokens
    }

    fn scan_token(&mut self, c: char) -> Option<Result<Token, ScanError>> {
        use TokenKind::*;

        match c {
            // Single character
            '(' => Some(Ok(self.make_token(LeftParen))),
            ')' => Some(Ok(self.make_token(RightParen))),
            '{' => Some(Ok(self.make_token(LeftBrace))),
            '}' => Some(Ok(self.make_token(RightBrace))),
            ',' => Some(Ok(self.make_token(Comma))),
            '.' => Some(Ok(self.make_token(Dot))),
            '-' => Some(Ok(self.make_token(Minus))),
            '+' => Some(Ok(self.make_token(Plus))),
            ';' => Some(Ok(self.make_token(Semicolon))),
            '*' => Some(Ok(self.make_token(Star))),

            // Operators
            '!' => Some(Ok(self.scan_operator(Bang, BangEqual))),
            '=' => Some(Ok(self.scan_operator(Equal, EqualEqual))),
            '<' => Some(Ok(self.scan_operator(Less, LessEqual))),
            '>' => Some(Ok(self.scan_operator(Greater, GreaterEqual))),

            // Slash or comment
            '/' => {
                if self.match_char('/') {
                    self.skip_comment();
                    None
                } else {
                    Some(Ok(self.make_token(Slash)))
                }
            }

            // Whitespace
            ' ' | '\t' | '\r' => None,
            '\n' => {
                self.line += 1;
                None
            }

            // Literals
            '"' => Some(self.scan_string()),
            c if c.is_ascii_digit() => Some(Ok(self.scan_number())),
            c if is_alpha(c) => Some(Ok(self.scan_identifier())),

            // Unknown
            _ => Some(Err(ScanError::UnexpectedCharacter {
                ch: c,
                line: self.line,
                offset: self.start,
            })),
        }
    }

    fn scan_operator(&mut self, single: TokenKind, double: TokenKind) -> Token {
        if self.match_char('=') {
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    // Stops before the newline so the main loop counts it.
    fn skip_comment(&mut self) {
        self.eat_while(|c| c != '\n');
    }

    fn scan_identifier(&mut self) -> Token {
        self.eat_while(is_alpha_numeric);

        let kind = TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);

        self.make_token(kind)
    }

    fn scan_number(&mut self) -> Token {
        self.eat_while(|c| c.is_ascii_digit());

        // A '.' only belongs to the number when a digit follows it.
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            self.eat_while(|c| c.is_ascii_digit());
        }

        let value: f64 = self
            .lexeme()
            .parse()
            .expect("digits with an optional fraction always parse");

        self.make_literal(TokenKind::Number, Literal::Number(value))
    }

    fn scan_string(&mut self) -> Result<Token, ScanError> {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(ScanError::UnterminatedString {
                line: self.line,
                offset: self.start,
            });
        }

        // The closing quote.
        self.advance();

        let value = &self.src[self.start + 1..self.current - 1];

        Ok(self.make_literal(TokenKind::String, Literal::String(value.to_string())))
    }

    // HELPERS
    // =======

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.src.len()
    }

    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();

        Some(c)
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.current..].chars().next()
    }

    #[inline]
    fn peek_next(&self) -> Option<char> {
        self.src[self.current..].chars().nth(1)
    }

    #[inline]
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().map_or(false, &predicate) {
            self.advance();
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.src[self.start..self.current]
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), None, self.start_line, self.start)
    }

    fn make_literal(&self, kind: TokenKind, literal: Literal) -> Token {
        Token::new(kind, self.lexeme(), Some(literal), self.start_line, self.start)
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
