use lox_syntax::{Reporter, ScanError};

/// Prints each error with its source context to stderr and counts them.
///
/// One reporter lives for one run of the lexer, so dropping it is how the prompt forgets errors
/// from the previous line.
pub struct ConsoleReporter<'s> {
    src: &'s str,
    errors: usize,
}

impl<'s> ConsoleReporter<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, errors: 0 }
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn had_error(&self) -> bool {
        self.errors > 0
    }
}

impl Reporter for ConsoleReporter<'_> {
    fn report(&mut self, error: &ScanError) {
        self.errors += 1;
        eprintln!("{}", error.format(self.src));
    }
}
