use thiserror::Error;

/// The two ways a SheetScript source can be rejected. Either one aborts the
/// whole parse; there is never more than one error per run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// A character no token rule accepts.
    #[error("Illegal character '{character}' at line {line}")]
    LexicalError { character: char, line: usize },
    /// A token that cannot extend any valid derivation. `token` is `EOF` when
    /// the input ended too early.
    #[error("{line}:Syntax Error (token:'{token}')")]
    SyntaxError { token: String, line: usize },
}

impl SheetError {
    pub fn line(&self) -> usize {
        match self {
            SheetError::LexicalError { line, .. } | SheetError::SyntaxError { line, .. } => *line,
        }
    }
}
