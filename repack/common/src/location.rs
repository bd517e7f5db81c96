use crate::CodeId;

/// A position inside of a source file, as shown to the user.
///
/// Lines and columns are 1-based, `len` is the amount of characters that belong to
/// the marked item.
#[derive(Debug, Default, Eq, PartialEq, Hash, Clone, Copy)]
pub struct SourceLocation {
    pub file: Option<CodeId>,
    pub line: usize,
    pub column: usize,
    pub len: usize,
}

impl SourceLocation {
    pub fn new(file: Option<CodeId>, line: usize, column: usize, len: usize) -> Self {
        SourceLocation {
            file,
            line,
            column,
            len,
        }
    }

    /// Returns the (start, end) character range of this location inside of its line.
    ///
    /// The range is clamped so that it always marks at least one character of a line
    /// with `line_len` characters, unless the line is empty.
    pub fn char_range(&self, line_len: usize) -> (usize, usize) {
        if line_len == 0 {
            return (0, 0);
        }
        let start = self.column.saturating_sub(1).min(line_len - 1);
        let end = (start + self.len.max(1)).min(line_len);
        (start, end)
    }
}
