use thiserror::Error;

use crate::utils::display_expected_of_any;

/// Errors which occur while building the syntax tree of a file
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum ParseError {
    #[error("Unexpected token '{got}'")]
    UnexpectedToken { got: String, expected: Vec<String> },
    #[error("Unexpected end of file")]
    UnexpectedEndOfInput { expected: Vec<String> },
    #[error("The scope opened by '{opener}' is never closed")]
    UnclosedScope { opener: String },
    #[error("Unexpected token '{keyword}'")]
    MisplacedChainedScope { keyword: String, after: String },
    #[error("Expected an identifier list, not a map of predicates and values")]
    MapAllWithoutIdentifierList,
}

impl ParseError {
    pub fn hints(&self) -> Vec<String> {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEndOfInput { expected } => {
                if expected.is_empty() {
                    vec![]
                } else {
                    vec![display_expected_of_any(expected)]
                }
            }
            ParseError::UnclosedScope { .. } => vec!["Expected '}'".to_string()],
            ParseError::MisplacedChainedScope { keyword, after } => {
                vec![format!(
                    "'{keyword}' can only be used directly after a {after}"
                )]
            }
            ParseError::MapAllWithoutIdentifierList => vec![
                "Remove the values (e.g. '= \"texture\"') from the listing, or remove the assignment after it"
                    .to_string(),
            ],
        }
    }
}
