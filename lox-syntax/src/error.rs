use thiserror::Error;

/// A recoverable problem found while scanning. Scanning always continues past it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("Unexpected character.")]
    UnexpectedCharacter { ch: char, line: usize, offset: usize },

    #[error("Unterminated string.")]
    UnterminatedString { line: usize, offset: usize },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { line, .. } => *line,
            ScanError::UnterminatedString { line, .. } => *line,
        }
    }

    /// Byte offset the error points at. For unterminated strings this is the opening quote.
    pub fn offset(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { offset, .. } => *offset,
            ScanError::UnterminatedString { offset, .. } => *offset,
        }
    }

    pub fn format(&self, src: &str) -> String {
        let (row, column) = self.calc_row_column(src);

        let line = src.split('\n').nth(row - 1).unwrap_or("").trim_end_matches('\r');
        let row = format!("{row:>5}");
        let spaces = " ".repeat(row.len() + 3 + column);

        format!(
            "[line {line_no}] Error: {msg}\n\n{row} | {line}\n{spaces}^--- Here.",
            line_no = self.line(),
            msg = self,
        )
    }

    // Zero-based column, counted in chars.
    fn calc_row_column(&self, src: &str) -> (usize, usize) {
        let offset = self.offset().min(src.len());
        let before = src.get(..offset).unwrap_or(src);

        let row = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count();

        (row, column)
    }
}
