pub mod error;
pub mod lexer;
pub mod reporter;
pub mod token;

pub use error::ScanError;
pub use lexer::Lexer;
pub use reporter::{NullReporter, Reporter};
pub use token::{Literal, Token, TokenKind};

/// Scans `src` with a fresh [`Lexer`], returning the tokens and every error found.
pub fn scan(src: &str) -> (Vec<Token>, Vec<ScanError>) {
    Lexer::new(src).scan_tokens()
}
