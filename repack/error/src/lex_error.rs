use thiserror::Error;

/// Errors which occur while splitting a file into tokens
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LexError {
    #[error("Expected text literal to end, but reached the end of the file")]
    UnterminatedString,
    #[error("Expected text literal to end at the same line")]
    NewlineInString,
    #[error("Invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String },
    #[error("Expected block comment to end, but reached the end of the file")]
    UnterminatedComment,
}

impl LexError {
    pub fn hints(&self) -> Vec<String> {
        match self {
            LexError::UnterminatedString | LexError::NewlineInString => vec![
                "All text literals (anything between \" or ') have to end with the same character on the same line"
                    .to_string(),
            ],
            LexError::InvalidEscape { .. } => vec![
                r#"Valid escape sequences are \n \t \b \f \r \" \' \\, \uXXXX and a single digit like \0"#
                    .to_string(),
            ],
            LexError::UnterminatedComment => {
                vec!["Block comments have to be closed with '*/'".to_string()]
            }
        }
    }
}
