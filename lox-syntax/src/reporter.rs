use crate::error::ScanError;

/// Receives lexical errors as the lexer finds them.
///
/// Reporting is purely observational: the lexer never looks at what the reporter did and keeps
/// scanning either way. Whether errors stop a later stage is up to the caller.
pub trait Reporter {
    fn report(&mut self, error: &ScanError);
}

/// Collects every reported error, in order.
impl Reporter for Vec<ScanError> {
    fn report(&mut self, error: &ScanError) {
        self.push(error.clone());
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, error: &ScanError) {
        (**self).report(error)
    }
}

/// Drops every error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _error: &ScanError) {}
}
